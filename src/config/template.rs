/// Configuration written by `svg-barchart init`. Mirrors the chart defaults.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# svg-barchart configuration
# Every key is optional; missing keys keep the chart defaults.

# Outer SVG size in pixels
svg_width = 500
svg_height = 500

# Space reserved around the bars
margin_top = 40
margin_bottom = 5
margin_right = 300
margin_left = 5

# Selector of the element the chart is drawn into (tag, #id or .class)
container = "body"

default_text_fill = "#2C3E50"
default_font = "Helvetica"

# Rows can also be given inline:
# [[data]]
# key = "alpha"
# value = 10
"##;
