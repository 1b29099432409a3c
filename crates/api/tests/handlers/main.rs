mod test_utils;

mod availability_test;
mod config_test;
mod middleware_test;
