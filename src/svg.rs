use crate::stats::StatsCard;

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 150;
/// Origin of the stat grid inside the card.
pub const CONTENT_X: u32 = 25;
pub const CONTENT_Y: u32 = 30;
/// Horizontal offset of each column from the grid origin.
pub const COLUMN_X: [u32; 2] = [0, 300];
pub const ROW_HEIGHT: u32 = 35;
pub const ICON_SIZE: u32 = 16;
pub const ICON_Y: i32 = -2;
pub const LABEL_X: u32 = 25;
pub const TEXT_Y: f32 = 12.5;

pub const DEFAULT_TITLE: &str = "GitHub Stats Card";
const DESCRIPTION: &str = "GitHub statistics for user contributions";
const FONT: &str = "'Segoe UI', Ubuntu, Sans-Serif";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub header: &'static str,
    pub stat: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub bg: &'static str,
    pub border: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                header: "#58a6ff",
                stat: "#e1e4e8",
                label: "#8b949e",
                icon: "#8b949e",
                bg: "#0d1117",
                border: "#30363d",
            },
            Theme::Light => ThemeColors {
                header: "#2f80ed",
                stat: "#434d58",
                label: "#586069",
                icon: "#586069",
                bg: "#fffefe",
                border: "#e4e2e2",
            },
        }
    }
}

/// One of the six numbers on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Stars,
    Commits,
    PullRequests,
    Issues,
    ContributedTo,
    Contributions,
}

/// Where a field sits: grid cell, label text, and the x of its value.
pub struct FieldLayout {
    pub label: &'static str,
    pub column: usize,
    pub row: u32,
    pub value_x: u32,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Stars,
        Field::Commits,
        Field::PullRequests,
        Field::Issues,
        Field::ContributedTo,
        Field::Contributions,
    ];

    pub fn layout(self) -> FieldLayout {
        let (label, column, row, value_x) = match self {
            Field::Stars => ("Total Stars:", 0, 0, 135),
            Field::Commits => ("Total Commits:", 0, 1, 145),
            Field::PullRequests => ("Total PRs:", 0, 2, 110),
            Field::Issues => ("Total Issues:", 1, 0, 125),
            Field::ContributedTo => ("Contributed to:", 1, 1, 150),
            Field::Contributions => ("Contributions:", 1, 2, 135),
        };
        FieldLayout {
            label,
            column,
            row,
            value_x,
        }
    }

    pub fn value(self, card: &StatsCard) -> u64 {
        match self {
            Field::Stars => card.total_stars,
            Field::Commits => card.total_commits,
            Field::PullRequests => card.total_prs,
            Field::Issues => card.total_issues,
            Field::ContributedTo => card.contributed_to,
            Field::Contributions => card.total_contributions,
        }
    }

    /// `translate(...)` of the field's group relative to the grid origin.
    pub fn offset(self) -> (u32, u32) {
        let layout = self.layout();
        (COLUMN_X[layout.column], layout.row * ROW_HEIGHT)
    }

    fn comment(self) -> &'static str {
        match self {
            Field::Stars => "Total Stars",
            Field::Commits => "Total Commits",
            Field::PullRequests => "Total PRs",
            Field::Issues => "Total Issues",
            Field::ContributedTo => "Contributed To",
            Field::Contributions => "Total Contributions",
        }
    }

    // Octicons, 16x16 viewBox.
    fn icon_path(self) -> &'static str {
        match self {
            Field::Stars => {
                "M8 .25a.75.75 0 01.673.418l1.882 3.815 4.21.612a.75.75 0 01.416 1.279l-3.046 2.97.719 4.192a.75.75 0 01-1.088.791L8 12.347l-3.766 1.98a.75.75 0 01-1.088-.79l.72-4.194L.818 6.374a.75.75 0 01.416-1.28l4.21-.611L7.327.668A.75.75 0 018 .25z"
            }
            Field::Commits => {
                "M1.643 3.143L.427 1.927A.25.25 0 000 2.104V5.75c0 .138.112.25.25.25h3.646a.25.25 0 00.177-.427L2.715 4.215a6.5 6.5 0 11-1.18 4.458.75.75 0 10-1.493.154 8.001 8.001 0 101.6-5.684zM7.75 4a.75.75 0 01.75.75v2.992l2.028.812a.75.75 0 01-.557 1.392l-2.5-1A.75.75 0 017 8.25v-3.5A.75.75 0 017.75 4z"
            }
            Field::PullRequests => {
                "M7.177 3.073L9.573.677A.25.25 0 0110 .854v4.792a.25.25 0 01-.427.177L7.177 3.427a.25.25 0 010-.354zM3.75 2.5a.75.75 0 100 1.5.75.75 0 000-1.5zm-2.25.75a2.25 2.25 0 113 2.122v5.256a2.251 2.251 0 11-1.5 0V5.372A2.25 2.25 0 011.5 3.25zM11 2.5h-1V4h1a1 1 0 011 1v5.628a2.251 2.251 0 101.5 0V5A2.5 2.5 0 0011 2.5zm1 10.25a.75.75 0 111.5 0 .75.75 0 01-1.5 0zM3.75 12a.75.75 0 100 1.5.75.75 0 000-1.5z"
            }
            Field::Issues => {
                "M8 1.5a6.5 6.5 0 100 13 6.5 6.5 0 000-13zM0 8a8 8 0 1116 0A8 8 0 010 8zm9 3a1 1 0 11-2 0 1 1 0 012 0zm-.25-6.25a.75.75 0 00-1.5 0v3.5a.75.75 0 001.5 0v-3.5z"
            }
            Field::ContributedTo => {
                "M2 2.5A2.5 2.5 0 014.5 0h8.75a.75.75 0 01.75.75v12.5a.75.75 0 01-.75.75h-2.5a.75.75 0 110-1.5h1.75v-2h-8a1 1 0 00-.714 1.7.75.75 0 01-1.072 1.05A2.495 2.495 0 012 11.5v-9zm10.5-1V9h-8c-.356 0-.694.074-1 .208V2.5a1 1 0 011-1h8zM5 12.25v3.25a.25.25 0 00.4.2l1.45-1.087a.25.25 0 01.3 0L8.6 15.7a.25.25 0 00.4-.2v-3.25a.25.25 0 00-.25-.25h-3.5a.25.25 0 00-.25.25z"
            }
            Field::Contributions => {
                "M1.75 0A1.75 1.75 0 000 1.75v12.5C0 15.216.784 16 1.75 16h12.5A1.75 1.75 0 0016 14.25V1.75A1.75 1.75 0 0014.25 0H1.75zM1.5 1.75a.25.25 0 01.25-.25h12.5a.25.25 0 01.25.25v12.5a.25.25 0 01-.25.25H1.75a.25.25 0 01-.25-.25V1.75zM11.75 3a.75.75 0 00-.75.75v7.5a.75.75 0 001.5 0v-7.5a.75.75 0 00-.75-.75zm-8.25.75a.75.75 0 011.5 0v5.5a.75.75 0 01-1.5 0v-5.5zM8 3a.75.75 0 00-.75.75v3.5a.75.75 0 001.5 0v-3.5A.75.75 0 008 3z"
            }
        }
    }

    // The star keeps its gold fill in both themes.
    fn icon_fill(self) -> &'static str {
        match self {
            Field::Stars => r##"fill="#FFD700""##,
            _ => r#"class="icon""#,
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Light palette as the default, dark palette behind the media query.
fn build_style() -> String {
    let light = Theme::Light.colors();
    let dark = Theme::Dark.colors();

    format!(
        r#"  <style>
    .header {{ font: 600 18px {FONT}; fill: {lh}; }}
    .stat {{ font: 600 14px {FONT}; fill: {ls}; }}
    .statlabel {{ font: 400 12px {FONT}; fill: {ll}; }}
    .icon {{ fill: {li}; }}
    .card-bg {{ fill: {lb}; }}
    .card-border {{ stroke: {lbo}; }}

    @media (prefers-color-scheme: dark) {{
      .header {{ fill: {dh}; }}
      .stat {{ fill: {ds}; }}
      .statlabel {{ fill: {dl}; }}
      .icon {{ fill: {di}; }}
      .card-bg {{ fill: {db}; }}
      .card-border {{ stroke: {dbo}; }}
    }}
  </style>
"#,
        lh = light.header,
        ls = light.stat,
        ll = light.label,
        li = light.icon,
        lb = light.bg,
        lbo = light.border,
        dh = dark.header,
        ds = dark.stat,
        dl = dark.label,
        di = dark.icon,
        db = dark.bg,
        dbo = dark.border,
    )
}

fn build_field(field: Field, card: &StatsCard) -> String {
    let layout = field.layout();
    let (dx, dy) = field.offset();

    format!(
        r#"    <!-- {comment} -->
    <g transform="translate({dx}, {dy})">
      <svg y="{ICON_Y}" viewBox="0 0 16 16" version="1.1" width="{ICON_SIZE}" height="{ICON_SIZE}">
        <path {fill} fill-rule="evenodd" d="{path}"/>
      </svg>
      <text class="stat" x="{LABEL_X}" y="{TEXT_Y}">{label}</text>
      <text class="stat" x="{value_x}" y="{TEXT_Y}" font-weight="bold">{value}</text>
    </g>
"#,
        comment = field.comment(),
        fill = field.icon_fill(),
        path = field.icon_path(),
        label = escape_xml(layout.label),
        value_x = layout.value_x,
        value = field.value(card),
    )
}

/// Render the card with the default title.
pub fn render(card: &StatsCard) -> String {
    render_with_title(card, DEFAULT_TITLE)
}

/// Render the card; `title` becomes the accessible `<title>`.
pub fn render_with_title(card: &StatsCard, title: &str) -> String {
    let fields: String = Field::ALL
        .iter()
        .map(|&f| build_field(f, card))
        .collect();

    format!(
        r#"<svg width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}" fill="none" xmlns="http://www.w3.org/2000/svg" role="img" aria-labelledby="titleId descId">
  <title id="titleId">{title}</title>
  <desc id="descId">{DESCRIPTION}</desc>

{style}
  <rect class="card-bg card-border" x="0.5" y="0.5" rx="4.5" height="{rect_h}" width="{rect_w}" stroke-width="1" stroke-opacity="1"/>

  <g transform="translate({CONTENT_X}, {CONTENT_Y})">
{fields}  </g>
</svg>
"#,
        title = escape_xml(title),
        style = build_style(),
        rect_h = CARD_HEIGHT - 1,
        rect_w = CARD_WIDTH - 1,
        fields = fields,
    )
}
