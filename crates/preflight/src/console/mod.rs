mod logger;
pub(crate) use logger::Console;
