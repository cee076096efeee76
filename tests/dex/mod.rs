//! Index tests against real keg directories

mod property_tests;
mod rebuild_tests;
