pub mod forwarder;
pub mod test_impl;
