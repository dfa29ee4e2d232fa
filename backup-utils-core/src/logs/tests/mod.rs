mod export_tests;
mod helpers;
mod merge_tests;
mod parse_tests;
mod viewer_tests;
