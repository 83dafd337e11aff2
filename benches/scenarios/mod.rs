//! Benchmarks for complete topologies.

mod topologies;

pub use topologies::bench_topologies;
