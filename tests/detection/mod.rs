pub mod pipeline_tests;
pub mod window_tests;
