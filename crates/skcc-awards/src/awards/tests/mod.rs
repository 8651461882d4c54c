mod common;

mod centurion;
mod prefix;
mod tribune_senator;
