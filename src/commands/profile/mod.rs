mod layout;
mod run;

pub(crate) use run::run;
