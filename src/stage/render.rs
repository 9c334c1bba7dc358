// Renders a placed roster as an SVG scatter chart of the stage.
//
// The row axis is inverted: row 1 (the front row, shortest members) sits at
// the bottom of the chart, the back row at the top.

use std::fmt::Write;

use stage_layout::{Palette, PlacedMember, Section};

pub struct StageChart {
    width: f64,
    height: f64,
    margin: f64,
    point_radius: f64,
}

impl Default for StageChart {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 480.0,
            margin: 60.0,
            point_radius: 14.0,
        }
    }
}

impl StageChart {
    pub fn render(&self, placements: &[PlacedMember], palette: &Palette) -> String {
        let num_rows = placements.iter().map(|p| p.row).max().unwrap_or(1);
        let num_cols = placements.iter().map(|p| p.column).max().unwrap_or(1);

        let plot_w = self.width - 2.0 * self.margin;
        let plot_h = self.height - 2.0 * self.margin;
        let x_step = plot_w / (num_cols + 1) as f64;
        let y_step = plot_h / (num_rows + 1) as f64;
        // Row 1 at the bottom.
        let x_of = |column: u32| self.margin + column as f64 * x_step;
        let y_of = |row: u32| self.height - self.margin - row as f64 * y_step;

        let mut svg = String::new();

        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        )
        .unwrap();

        // Style
        writeln!(
            &mut svg,
            r#"<style>
  .title {{ font-family: sans-serif; font-size: 18px; font-weight: bold; }}
  .axis-label {{ font-family: sans-serif; font-size: 13px; fill: #333; }}
  .row-tick {{ font-family: sans-serif; font-size: 12px; fill: #666; }}
  .member-label {{ font-family: sans-serif; font-size: 11px; font-weight: bold; }}
  .legend-label {{ font-family: sans-serif; font-size: 12px; }}
  .grid {{ stroke: #bbb; stroke-width: 1; stroke-dasharray: 4 3; }}
  .member {{ stroke: #2f4f4f; stroke-width: 2; fill-opacity: 0.8; }}
</style>"#
        )
        .unwrap();

        writeln!(
            &mut svg,
            r#"<text class="title" x="{}" y="28" text-anchor="middle">Choir Stage Layout</text>"#,
            self.width / 2.0
        )
        .unwrap();

        // Grid lines and row ticks, back row first so the front row label
        // lands at the bottom.
        for row in 1..=num_rows {
            let y = y_of(row);
            writeln!(
                &mut svg,
                r#"<line class="grid" x1="{}" y1="{}" x2="{}" y2="{}" />"#,
                self.margin,
                y,
                self.width - self.margin,
                y
            )
            .unwrap();
            writeln!(
                &mut svg,
                r#"<text class="row-tick" x="{}" y="{}" text-anchor="end">Row {}</text>"#,
                self.margin - 8.0,
                y + 4.0,
                row
            )
            .unwrap();
        }

        // Axis titles
        writeln!(
            &mut svg,
            r#"<text class="axis-label" x="{}" y="{}" text-anchor="middle">Stage Columns</text>"#,
            self.width / 2.0,
            self.height - 16.0
        )
        .unwrap();
        writeln!(
            &mut svg,
            r#"<text class="axis-label" x="18" y="{}" text-anchor="middle" transform="rotate(-90 18 {})">Stage Rows (Front = 1, Back = {})</text>"#,
            self.height / 2.0,
            self.height / 2.0,
            num_rows
        )
        .unwrap();

        // One dot per member, with its initials above.
        for p in placements.iter() {
            let x = x_of(p.column);
            let y = y_of(p.row);
            writeln!(
                &mut svg,
                r#"<circle class="member" cx="{}" cy="{}" r="{}" fill="{}" />"#,
                x,
                y,
                self.point_radius,
                palette.color_for(&p.section)
            )
            .unwrap();
            writeln!(
                &mut svg,
                r#"<text class="member-label" x="{}" y="{}" text-anchor="middle">{}</text>"#,
                x,
                y - self.point_radius - 5.0,
                escape_xml(&initials(&p.name))
            )
            .unwrap();
        }

        self.render_legend(&mut svg, placements, palette);

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    fn render_legend(&self, svg: &mut String, placements: &[PlacedMember], palette: &Palette) {
        // One entry per section present in the layout, in order of first
        // appearance. Unknown sections get their own entry with the
        // fallback color.
        let mut sections: Vec<&Section> = Vec::new();
        for p in placements.iter() {
            if !sections.contains(&&p.section) {
                sections.push(&p.section);
            }
        }

        let x = self.width - self.margin - 110.0;
        let mut y = self.margin;
        for section in sections {
            writeln!(
                svg,
                r##"<circle cx="{}" cy="{}" r="6" fill="{}" stroke="#2f4f4f" />"##,
                x,
                y,
                palette.color_for(section)
            )
            .unwrap();
            writeln!(
                svg,
                r#"<text class="legend-label" x="{}" y="{}">{}</text>"#,
                x + 12.0,
                y + 4.0,
                escape_xml(section.label())
            )
            .unwrap();
            y += 18.0;
        }
    }
}

/// The first letter of the first and last whitespace-separated words of the
/// name. Single-word names yield a single letter.
fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first = words.first().and_then(|w| w.chars().next());
    let last = if words.len() > 1 {
        words.last().and_then(|w| w.chars().next())
    } else {
        None
    };
    first.into_iter().chain(last).collect()
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(name: &str, section: &str, row: u32, column: u32) -> PlacedMember {
        PlacedMember {
            name: name.to_string(),
            section: Section::from_label(section),
            row,
            column,
        }
    }

    #[test]
    fn chart_contains_points_labels_and_legend() {
        let placements = vec![
            placed("Ann Smith", "Soprano", 1, 1),
            placed("Ben Ode", "Alto", 1, 2),
            placed("Cam Fox", "Tenor", 2, 1),
        ];
        let svg = StageChart::default().render(&placements, &Palette::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"fill="red""#));
        assert!(svg.contains(r#"fill="blue""#));
        assert!(svg.contains(">AS</text>"));
        assert!(svg.contains(">BO</text>"));
        assert!(svg.contains(">Soprano</text>"));
        assert!(svg.contains("Stage Columns"));
    }

    #[test]
    fn front_row_is_rendered_below_the_back_row() {
        let placements = vec![
            placed("Ann Smith", "Soprano", 1, 1),
            placed("Eva Ray", "Soprano", 3, 1),
        ];
        let chart = StageChart::default();
        let svg = chart.render(&placements, &Palette::default());
        let cy_values: Vec<f64> = svg
            .lines()
            .filter(|l| l.contains(r#"class="member""#))
            .map(|l| {
                let start = l.find("cy=\"").unwrap() + 4;
                let end = l[start..].find('"').unwrap() + start;
                l[start..end].parse::<f64>().unwrap()
            })
            .collect();
        assert_eq!(cy_values.len(), 2);
        // Larger y means lower on the screen.
        assert!(cy_values[0] > cy_values[1]);
    }

    #[test]
    fn unknown_sections_use_the_fallback_color() {
        let placements = vec![placed("Ben Ode", "Baritone", 1, 1)];
        let svg = StageChart::default().render(&placements, &Palette::default());
        assert!(svg.contains(r#"fill="black""#));
        assert!(svg.contains(">Baritone</text>"));
    }

    #[test]
    fn initials_take_first_and_last_words() {
        assert_eq!(initials("Ann Smith"), "AS");
        assert_eq!(initials("Ann Mary de Smith"), "AS");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials(""), "");
    }
}
