// Pipeline: one pass from review file to ranked output.

pub mod generate;
