#![allow(dead_code)]

pub mod diagrams;
