mod common;
mod intake;
mod language;
