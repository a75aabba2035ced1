//! Visualization modes offered by the dashboard

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidModeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualizationMode {
    /// Scatter of views against likes, one point per row
    ViewsToLikes,
    /// Grouped views/likes/comments bars per category on a log axis
    EngagementPerCategory,
    /// Diverging likes/dislikes bars per category
    LikesVsDislikes,
    /// Category -> channel sunburst sized by views
    TopChannels,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 4] = [
        VisualizationMode::ViewsToLikes,
        VisualizationMode::EngagementPerCategory,
        VisualizationMode::LikesVsDislikes,
        VisualizationMode::TopChannels,
    ];

    /// Dashboard label, as shown in the mode picker
    pub fn label(self) -> &'static str {
        match self {
            VisualizationMode::ViewsToLikes => "Views to Likes per Video",
            VisualizationMode::EngagementPerCategory => "User Engagement per Category",
            VisualizationMode::LikesVsDislikes => "Likes to Dislikes per Category",
            VisualizationMode::TopChannels => "Top Channels Popularity",
        }
    }

    /// Short name accepted on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            VisualizationMode::ViewsToLikes => "views-likes",
            VisualizationMode::EngagementPerCategory => "engagement",
            VisualizationMode::LikesVsDislikes => "likes-dislikes",
            VisualizationMode::TopChannels => "top-channels",
        }
    }
}

impl FromStr for VisualizationMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.cli_name().eq_ignore_ascii_case(wanted) || m.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| InvalidModeError(s.to_string()))
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
