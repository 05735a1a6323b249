pub mod report_writer;
pub mod setup_reader;
