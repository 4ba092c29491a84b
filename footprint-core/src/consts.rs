pub const DEFAULT_NRL: usize = 212;
pub const DEFAULT_WRAP: usize = 147;
pub const DEFAULT_NUM_NUCS: usize = 121;

pub const DEFAULT_LINK_PROB: f64 = 1.0;
pub const DEFAULT_NUC_PROB: f64 = 0.1;
pub const DEFAULT_DYAD_WIDTH: usize = 20;

pub const DEFAULT_TRIALS: usize = 100;
/// One break per this many nucleotides
pub const DEFAULT_BREAK_RATE: f64 = 150.0;
pub const DEFAULT_MIN_FRAGMENT_LENGTH: u64 = 0;

pub const DEFAULT_MAX_FRAGMENT_LENGTH: u64 = 1000;
pub const DEFAULT_DISTANCE_FROM_CENTER: u64 = 1200;
pub const DEFAULT_BIN_LENS: u64 = 10;
pub const DEFAULT_BIN_LOCS: u64 = 20;
pub const DEFAULT_LENGTH_BIN_WIDTH: u64 = 10;

pub const DEFAULT_THREAD_COUNT: usize = 4;

pub fn get_thread_count(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_THREAD_COUNT)
}
