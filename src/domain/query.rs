use super::AdminLevel;
use serde::Deserialize;

pub const DEFAULT_SERVER_TIMEOUT_SECS: u32 = 300;

/// Output form requested from Overpass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QueryStyle {
    /// Relations only, member geometry inlined (`out geom qt;`)
    #[default]
    Geom,
    /// Relations plus all members recursed down to nodes (`(._;>;); out body;`)
    Recurse,
}

/// Overpass QL query selecting administrative boundary relations at one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryQuery {
    pub level: AdminLevel,
    pub style: QueryStyle,
    pub server_timeout_secs: u32,
}

impl BoundaryQuery {
    pub fn new(level: AdminLevel) -> Self {
        Self {
            level,
            style: QueryStyle::default(),
            server_timeout_secs: DEFAULT_SERVER_TIMEOUT_SECS,
        }
    }

    pub fn with_style(mut self, style: QueryStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_server_timeout(mut self, secs: u32) -> Self {
        self.server_timeout_secs = secs;
        self
    }

    /// Query text as sent in the `data` form field
    ///
    /// Laid out as an indented block with a leading newline and a trailing
    /// `\n\t`; the whitespace goes over the wire unchanged.
    pub fn render(&self) -> String {
        let selector = format!(
            "rel[admin_level={}][type=boundary][boundary=administrative];",
            self.level
        );

        match self.style {
            QueryStyle::Geom => format!(
                "\n\t\t[timeout:{}];\n\t\t{}\n\t\tout geom qt;\n\t",
                self.server_timeout_secs, selector
            ),
            QueryStyle::Recurse => format!(
                "\n\t\t[timeout:{}];\n\t\t{}\n\t\t(._;>;);\n\t\tout body;\n\t",
                self.server_timeout_secs, selector
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_geom() {
        let query = BoundaryQuery::new(AdminLevel::new(2));
        assert_eq!(
            query.render(),
            "\n\t\t[timeout:300];\n\t\trel[admin_level=2][type=boundary][boundary=administrative];\n\t\tout geom qt;\n\t"
        );
    }

    #[test]
    fn test_render_substitutes_level_only_in_selector() {
        let rendered = BoundaryQuery::new(AdminLevel::new(4)).render();
        assert!(rendered.contains("\t\trel[admin_level=4][type=boundary][boundary=administrative];\n"));
        assert!(rendered.starts_with("\n\t\t[timeout:300];\n"));
        assert!(rendered.ends_with("out geom qt;\n\t"));
    }

    #[test]
    fn test_render_recurse() {
        let query = BoundaryQuery::new(AdminLevel::new(2))
            .with_style(QueryStyle::Recurse)
            .with_server_timeout(600);
        assert_eq!(
            query.render(),
            "\n\t\t[timeout:600];\n\t\trel[admin_level=2][type=boundary][boundary=administrative];\n\t\t(._;>;);\n\t\tout body;\n\t"
        );
    }
}
