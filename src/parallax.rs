use crate::{attrs::parallax_factor, geometry::css_px};

pub const PARALLAX_ATTR: &str = "data-parallax";
pub const PARALLAX_SELECTOR: &str = "[data-parallax]";

pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    -(scroll_y * factor)
}

/// Transform for one element at the given scroll offset.
pub fn parallax_transform(scroll_y: f64, raw_factor: Option<&str>) -> String {
    let offset = parallax_offset(scroll_y, parallax_factor(raw_factor));
    format!("translate3d(0, {}, 0)", css_px(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_two_at_offset_hundred_moves_up_two_hundred() {
        assert_eq!(parallax_transform(100.0, Some("2")), "translate3d(0, -200px, 0)");
    }

    #[test]
    fn missing_or_bad_factor_uses_half_speed() {
        assert_eq!(parallax_transform(100.0, None), "translate3d(0, -50px, 0)");
        assert_eq!(parallax_transform(100.0, Some("slow")), "translate3d(0, -50px, 0)");
    }

    #[test]
    fn top_of_page_has_no_offset() {
        assert_eq!(parallax_transform(0.0, Some("3")), "translate3d(0, 0px, 0)");
    }

    #[test]
    fn offset_is_negated_product() {
        for (scroll, factor) in [(0.0, 0.5), (37.5, 0.2), (1200.0, -0.75)] {
            assert_eq!(parallax_offset(scroll, factor), -(scroll * factor));
        }
    }
}
