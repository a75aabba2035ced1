//! Color definitions for charts

/// Common colors
pub(super) const COLOR_BACKGROUND: &str = "#0A0A0C"; // Near black
pub(super) const COLOR_TEXT: &str = "#FFFFFF"; // White
pub(super) const COLOR_GRID: &str = "#505050"; // Grid lines

/// Engagement metric colors (views, likes, comments)
pub(super) const COLOR_VIEWS: &str = "#68B4FF"; // Blue
pub(super) const COLOR_LIKES_BAR: &str = "#48F89C"; // Green
pub(super) const COLOR_COMMENTS: &str = "#FF68A8"; // Pink

/// Diverging likes/dislikes bars
pub(super) const COLOR_LIKES: &str = "#00B300"; // Green
pub(super) const COLOR_DISLIKES: &str = "#FF4D4D"; // Red
pub(super) const COLOR_BAR_BORDER: &str = "#000000";

/// Category palette, cycled when there are more categories than colors
pub(super) const CATEGORY_COLORS: [&str; 12] = [
    "#1888F8", // Vivid blue
    "#F03888", // Vivid magenta
    "#10D878", // Vivid green
    "#7840F8", // Vivid purple
    "#F8A800", // Orange
    "#58B8F0", // Cyan-blue
    "#E84800", // Red-orange
    "#B8E818", // Yellow
    "#982060", // Magenta
    "#48C878", // Green
    "#C4A4FF", // Light purple
    "#E8D800", // Gold
];

/// Color for the n-th category in sorted order
pub(super) fn category_color(index: usize) -> &'static str {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}
