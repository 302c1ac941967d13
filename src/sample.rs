pub mod average;
