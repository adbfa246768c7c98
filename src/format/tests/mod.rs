//! Tests for segmentation wire formats.

mod contour_json_tests;
