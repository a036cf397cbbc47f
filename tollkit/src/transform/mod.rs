//! Transformations.
//!
//! - [`pivot`], [`category`], [`filter`], [`scale`], [`coverage`]: per-row datasets
//! - [`distance`], [`threshold`], [`toll`]: the toll distance chain
//! - [`pipeline`]: file-level entry points used by the CLI

pub mod category;
pub mod coverage;
pub mod distance;
pub mod filter;
pub mod matrix;
pub mod pipeline;
pub mod pivot;
pub mod scale;
pub mod threshold;
pub mod toll;

pub use category::{count_by_bucket, get_type_count, BucketBounds};
pub use coverage::{check_coverage, time_check};
pub use distance::{calculate_distance_matrix, unroll_distance_matrix};
pub use filter::{filter_routes, get_bus_indexes, groups_with_mean_above, indexes_above_mean};
pub use matrix::Matrix;
pub use pivot::{build_matrix, generate_car_matrix};
pub use scale::{multiply_matrix, scale_matrix, ScalingRule};
pub use threshold::{
    find_ids_within_percentage, find_ids_within_ten_percentage_threshold, reference_band, ReferenceBand,
    ThresholdBasis,
};
pub use toll::{calculate_toll_rate, TollRates};
