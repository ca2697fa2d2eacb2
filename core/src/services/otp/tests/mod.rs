mod mocks;
mod service_tests;
mod verifier_tests;
