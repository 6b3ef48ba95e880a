//! Unit and behavioural tests for the query runtime.

mod support;
