//! Unit test modules.

mod grouping_test;
mod logger_test;
mod pace_test;
mod schedule_test;
mod zones_test;
