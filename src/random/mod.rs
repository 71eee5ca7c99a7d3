pub mod prng;
