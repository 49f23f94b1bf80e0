use mathsheet_types::{Color, Size};

/// Page geometry and typographic constants, in millimetres unless noted.
///
/// The defaults describe an A4 exercise sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_size: Size,
    /// X of the exercise number labels, the title and the footer.
    pub left_margin: f32,
    /// Indent of exercise text relative to `left_margin`.
    pub text_indent: f32,
    /// Width available to wrapped exercise text.
    pub content_width: f32,
    /// Where the cursor resumes on a freshly started page.
    pub top_margin: f32,
    /// A new exercise starts on a new page once the cursor is past this.
    pub exercise_break_y: f32,
    /// Lines and display math never extend past this.
    pub bottom_limit: f32,
    pub line_height: f32,
    pub exercise_gap: f32,

    pub title_y: f32,
    pub title_size_pt: f32,
    pub title_color: Color,
    pub title_rule_y: f32,
    pub title_rule_end_x: f32,
    pub title_rule_width: f32,
    pub title_rule_color: Color,
    /// Cursor position of the first exercise.
    pub body_start_y: f32,

    pub label_size_pt: f32,
    pub label_color: Color,
    pub text_size_pt: f32,
    pub text_color: Color,

    /// Height inline math is scaled to.
    pub inline_math_height: f32,
    pub inline_math_gap: f32,
    /// Lift of inline math relative to the text baseline.
    pub inline_baseline_offset: f32,
    pub max_display_math: Size,
    pub display_math_gap: f32,

    pub footer_y: f32,
    pub footer_attribution_x: f32,
    pub footer_size_pt: f32,
    pub footer_color: Color,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_size: Size::new(210.0, 297.0),
            left_margin: 20.0,
            text_indent: 15.0,
            content_width: 170.0,
            top_margin: 30.0,
            exercise_break_y: 250.0,
            bottom_limit: 280.0,
            line_height: 5.0,
            exercise_gap: 15.0,

            title_y: 40.0,
            title_size_pt: 24.0,
            title_color: Color::gray(40),
            title_rule_y: 45.0,
            title_rule_end_x: 190.0,
            title_rule_width: 0.5,
            title_rule_color: Color::gray(200),
            body_start_y: 65.0,

            label_size_pt: 12.0,
            label_color: Color::gray(80),
            text_size_pt: 11.0,
            text_color: Color::gray(40),

            inline_math_height: 5.0,
            inline_math_gap: 2.0,
            inline_baseline_offset: 1.0,
            max_display_math: Size::new(120.0, 18.0),
            display_math_gap: 5.0,

            footer_y: 290.0,
            footer_attribution_x: 150.0,
            footer_size_pt: 8.0,
            footer_color: Color::gray(150),
        }
    }
}

impl PageGeometry {
    pub fn text_x(&self) -> f32 {
        self.left_margin + self.text_indent
    }
}
