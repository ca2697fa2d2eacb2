mod challenge_tests;
mod keys_tests;
