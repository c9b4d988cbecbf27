use crate::error::VisualError;

pub const DEFAULT_COLORS: [&str; 2] = ["#3b82f6", "#8b5cf6"];

/// Ordered, non-empty list of color strings. Colors are passed to the
/// drawing context as-is, nothing is validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Result<Self, VisualError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            return Err(VisualError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, a `Palette` is never empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Cyclic assignment: index `i` gets `colors[i mod len]`.
    pub fn color_for(&self, i: usize) -> &str {
        &self.colors[i % self.colors.len()]
    }

    /// (bottom, top) colors of the bar gradient. A single-color palette
    /// yields the same color twice.
    pub fn gradient_stops(&self) -> (&str, &str) {
        let bottom = &self.colors[0];
        let top = self.colors.get(1).unwrap_or(bottom);
        (bottom, top)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_is_rejected() {
        let err = Palette::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, VisualError::EmptyPalette));
    }

    #[test]
    fn colors_cycle_by_index() {
        let p = Palette::new(["#a", "#b", "#c"]).unwrap();
        let picked: Vec<&str> = (0..7).map(|i| p.color_for(i)).collect();
        assert_eq!(picked, ["#a", "#b", "#c", "#a", "#b", "#c", "#a"]);
    }

    #[test]
    fn single_color_gradient_repeats_the_color() {
        let p = Palette::new(["#ff0000"]).unwrap();
        assert_eq!(p.gradient_stops(), ("#ff0000", "#ff0000"));
    }

    #[test]
    fn gradient_uses_first_two_colors() {
        let p = Palette::new(["#3b82f6", "#8b5cf6", "#ec4899"]).unwrap();
        assert_eq!(p.gradient_stops(), ("#3b82f6", "#8b5cf6"));
    }

    #[test]
    fn default_palette_is_blue_to_purple() {
        assert_eq!(Palette::default().colors(), ["#3b82f6", "#8b5cf6"]);
    }
}
