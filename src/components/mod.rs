pub mod relative_time_label;

pub use relative_time_label::RelativeTimeLabel;
