mod engine;
mod run;
#[cfg(test)]
mod tests;

pub(crate) use run::{SEGMENT_RUN_PREFIX, run};
