use eframe::egui::{Color32, CornerRadius, Style, Visuals, vec2};

/// Hex: #1E1E1E
pub const BACKGROUND_COLOR: Color32 = Color32::from_rgba_premultiplied(30, 30, 30, 255);

/// Hex: #0AC18E
pub const HIGHLIGHT_COLOR: Color32 = Color32::from_rgba_premultiplied(10, 193, 142, 255);

/// Hex: #A0A0A0
pub const SECONDARY_TEXT_COLOR: Color32 = Color32::from_rgba_premultiplied(160, 160, 160, 255);

#[derive(Clone, Debug)]
pub struct TextSizes {
   pub small: f32,
   pub normal: f32,
   pub large: f32,
   pub heading: f32,
}

impl TextSizes {
   pub fn new(small: f32, normal: f32, large: f32, heading: f32) -> Self {
      Self {
         small,
         normal,
         large,
         heading,
      }
   }
}

impl Default for TextSizes {
   fn default() -> Self {
      Self::new(13.0, 15.0, 17.0, 22.0)
   }
}

#[derive(Clone, Debug)]
pub struct Theme {
   pub style: Style,
   pub text_sizes: TextSizes,
   pub bg_color: Color32,
}

impl Theme {
   pub fn dark() -> Self {
      let mut style = Style {
         visuals: Visuals::dark(),
         ..Default::default()
      };

      style.visuals.panel_fill = BACKGROUND_COLOR;
      style.visuals.window_corner_radius = CornerRadius::same(10);
      style.visuals.selection.bg_fill = HIGHLIGHT_COLOR.gamma_multiply(0.6);
      style.visuals.hyperlink_color = HIGHLIGHT_COLOR;
      style.spacing.item_spacing = vec2(8.0, 8.0);
      style.animation_time = 0.3;

      Self {
         style,
         text_sizes: TextSizes::default(),
         bg_color: BACKGROUND_COLOR,
      }
   }
}
