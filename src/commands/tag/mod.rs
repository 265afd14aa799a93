mod run;
mod tagger;

pub(crate) use run::run;
pub(crate) use tagger::{TaggedLine, tag_document};
