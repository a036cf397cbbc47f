//! # tollkit - table transformations for toll network datasets
//!
//! Each operation loads one CSV, applies one self-contained transformation
//! and returns a matrix, mapping or list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV File   │────▶│   Parser    │────▶│  Transform  │────▶│   Render    │
//! │ (ISO/UTF8)  │     │ (auto-enc)  │     │ (one step)  │     │ table/json  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! The distance dataset chains further: edges → shortest-distance matrix →
//! long-form rows → percentage threshold or toll rates.
//!
//! ## Quick Start
//!
//! ```rust
//! use tollkit::{calculate_distance_matrix, unroll_distance_matrix, DistanceEdge};
//!
//! let edges = [DistanceEdge::new(1, 2, 10.0), DistanceEdge::new(2, 3, 10.0)];
//! let matrix = calculate_distance_matrix(&edges).unwrap();
//! assert_eq!(matrix.get(1, 3), Some(20.0));
//!
//! let rows = unroll_distance_matrix(&matrix);
//! assert_eq!(rows.len(), 6);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Tunable thresholds and rates
//! - [`logs`] - Progress logging over `tracing`
//! - [`models`] - Domain rows and enums
//! - [`parser`] - CSV loading with auto-detection
//! - [`transform`] - The transformations and file-level pipeline
//! - [`render`] - Table / JSON / CSV output

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod render;

// =============================================================================
// Re-exports - Errors and configuration
// =============================================================================

pub use config::Settings;
pub use error::{ConfigError, PipelineError, TransformError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Bucket, DistanceEdge, DistanceRow, Id, IntervalRecord, PairKey, TollRow, VehicleType};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_csv_file_auto,
    parse_str, CsvError, ParseResult, Table,
};

// =============================================================================
// Re-exports - Transformations
// =============================================================================

pub use transform::{
    build_matrix, calculate_distance_matrix, calculate_toll_rate, check_coverage, count_by_bucket,
    filter_routes, find_ids_within_percentage, find_ids_within_ten_percentage_threshold, generate_car_matrix,
    get_bus_indexes, get_type_count, groups_with_mean_above, indexes_above_mean, multiply_matrix, reference_band,
    scale_matrix, time_check, unroll_distance_matrix, BucketBounds, Matrix, ReferenceBand, ScalingRule,
    ThresholdBasis, TollRates,
};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use render::OutputFormat;
