//! Candidate blocks and the availability filter over them.

pub mod availability;
pub mod block;

pub use availability::{
    conflicts_with_commitment, filter_available_blocks, PreferredHours, TimeOfDay, SLEEP_HOURS,
};
pub use block::{
    generate_time_blocks, generate_time_blocks_from, TimeBlock, BLOCKS_PER_DAY, BLOCK_MINUTES,
    DAY_END_HOUR, DAY_START_HOUR, DEFAULT_HORIZON_DAYS,
};
