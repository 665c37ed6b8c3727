/// UI module exports
pub mod components;
pub mod dom;
pub mod newtab;
pub mod options;
