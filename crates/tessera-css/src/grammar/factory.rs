//! Primitive value matchers: the `<length>`s, `<color>`s, and other basic
//! data types that property grammars are built from.
//!
//! Property grammars never construct these directly; they ask a
//! [`MatcherFactory`]. Swapping the factory widens (or narrows) what every
//! property that uses a primitive accepts, without touching the property
//! grammars themselves.

use super::{
    Alternative, CustomPropertyMatcher, FunctionMatcher, Juxtaposition, KeywordMatcher,
    MatcherRef, Quantifier, TokenMatcher, UnorderedGroup,
};
use crate::token::{CSSToken, TokenKind};

/// [§ 6.1 Relative length units](https://www.w3.org/TR/css-values-4/#relative-lengths)
/// and [§ 6.2 Absolute length units](https://www.w3.org/TR/css-values-4/#absolute-lengths)
const LENGTH_UNITS: &[&str] = &[
    "em", "rem", "ex", "rex", "cap", "rcap", "ch", "rch", "ic", "ric", "lh", "rlh", "vw", "vh",
    "vi", "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw", "cqh", "cqi",
    "cqb", "cqmin", "cqmax", "cm", "mm", "q", "in", "pt", "pc", "px",
];

/// [§ 7.1 Angle units](https://www.w3.org/TR/css-values-4/#angles)
const ANGLE_UNITS: &[&str] = &["deg", "grad", "rad", "turn"];

/// [§ 7.2 Duration units](https://www.w3.org/TR/css-values-4/#time)
const TIME_UNITS: &[&str] = &["s", "ms"];

/// [§ 7.3 Frequency units](https://www.w3.org/TR/css-values-4/#frequency)
const FREQUENCY_UNITS: &[&str] = &["hz", "khz"];

/// [§ 7.4 Resolution units](https://www.w3.org/TR/css-values-4/#resolution)
const RESOLUTION_UNITS: &[&str] = &["dpi", "dpcm", "dppx", "x"];

/// [§ 6.1 Named colors](https://www.w3.org/TR/css-color-4/#named-colors)
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki", "darkmagenta",
    "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen",
    "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise", "darkviolet", "deeppink",
    "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick", "floralwhite", "forestgreen",
    "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod", "gray", "green", "greenyellow",
    "grey", "honeydew", "hotpink", "indianred", "indigo", "ivory", "khaki", "lavender",
    "lavenderblush", "lawngreen", "lemonchiffon", "lightblue", "lightcoral", "lightcyan",
    "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey", "lightpink", "lightsalmon",
    "lightseagreen", "lightskyblue", "lightslategray", "lightslategrey", "lightsteelblue",
    "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon", "mediumaquamarine",
    "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen", "mediumslateblue",
    "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue", "mintcream",
    "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab", "orange",
    "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise", "palevioletred",
    "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple", "rebeccapurple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "slategrey", "snow",
    "springgreen", "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet",
    "wheat", "white", "whitesmoke", "yellow", "yellowgreen", "transparent", "currentcolor",
];

/// [§ 7.3 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
const CSS_WIDE_KEYWORDS: &[&str] = &["initial", "inherit", "unset", "revert", "revert-layer"];

/// A dimension whose unit is one of `units` (ASCII case-insensitive).
fn dimension(units: &'static [&'static str]) -> MatcherRef {
    TokenMatcher::of(TokenKind::Dimension, move |token| {
        token
            .unit()
            .is_some_and(|unit| units.iter().any(|u| u.eq_ignore_ascii_case(unit)))
    })
}

/// Returns true if `value` is 3, 4, 6, or 8 hex digits, limited to `lengths`.
fn is_hex_color(value: &str, lengths: &[usize]) -> bool {
    lengths.contains(&value.len()) && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Supplies the primitive value matchers property grammars are built from.
///
/// Every method has a default, so an implementation overrides only what it
/// widens. The defaults build on each other through `self`, so overriding
/// [`MatcherFactory::color_hex`] also changes [`MatcherFactory::color`].
pub trait MatcherFactory: core::fmt::Debug + Send + Sync {
    /// [§ 5.2 Integers](https://www.w3.org/TR/css-values-4/#integers)
    fn integer(&self) -> MatcherRef {
        TokenMatcher::of(TokenKind::Number, CSSToken::is_integer)
    }

    /// [§ 5.3 Real numbers](https://www.w3.org/TR/css-values-4/#numbers)
    fn number(&self) -> MatcherRef {
        TokenMatcher::any(TokenKind::Number)
    }

    /// [§ 5.5 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    fn percentage(&self) -> MatcherRef {
        TokenMatcher::any(TokenKind::Percentage)
    }

    /// A literal `0`, the unitless zero allowed in place of a length or angle.
    ///
    /// The comparison is exact: `1e-20` is a number, not a zero.
    fn zero(&self) -> MatcherRef {
        TokenMatcher::of(TokenKind::Number, |token| {
            token.numeric_value().is_some_and(|v| v == 0.0)
        })
    }

    /// [§ 6 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
    ///
    /// "for zero lengths the unit identifier is optional"
    fn length(&self) -> MatcherRef {
        Alternative::of([dimension(LENGTH_UNITS), self.zero()])
    }

    /// `<length-percentage>`
    fn length_percentage(&self) -> MatcherRef {
        Alternative::of([self.length(), self.percentage()])
    }

    /// [§ 7.1 Angle Units](https://www.w3.org/TR/css-values-4/#angles)
    fn angle(&self) -> MatcherRef {
        dimension(ANGLE_UNITS)
    }

    /// `<angle-percentage>`
    fn angle_percentage(&self) -> MatcherRef {
        Alternative::of([self.angle(), self.percentage()])
    }

    /// [§ 7.2 Duration Units](https://www.w3.org/TR/css-values-4/#time)
    fn time(&self) -> MatcherRef {
        dimension(TIME_UNITS)
    }

    /// [§ 7.3 Frequency Units](https://www.w3.org/TR/css-values-4/#frequency)
    fn frequency(&self) -> MatcherRef {
        dimension(FREQUENCY_UNITS)
    }

    /// [§ 7.4 Resolution Units](https://www.w3.org/TR/css-values-4/#resolution)
    fn resolution(&self) -> MatcherRef {
        dimension(RESOLUTION_UNITS)
    }

    /// A bare `<comma-token>`.
    fn comma(&self) -> MatcherRef {
        TokenMatcher::any(TokenKind::Comma)
    }

    /// [§ 4.3 Quoted Strings](https://www.w3.org/TR/css-values-4/#strings)
    fn string(&self) -> MatcherRef {
        TokenMatcher::any(TokenKind::String)
    }

    /// [§ 4.2 Author-defined Identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
    ///
    /// "The CSS-wide keywords are not valid `<custom-ident>`s. The `default`
    /// keyword is reserved and is also not a valid `<custom-ident>`."
    fn custom_ident(&self) -> MatcherRef {
        TokenMatcher::of(TokenKind::Ident, |token| {
            token.text().is_some_and(|ident| {
                !ident.eq_ignore_ascii_case("default")
                    && !CSS_WIDE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(ident))
            })
        })
    }

    /// [§ 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
    ///
    /// "`<url> = url( <string> <url-modifier>* ) | <url-token>`"
    fn url(&self) -> MatcherRef {
        Alternative::of([
            TokenMatcher::any(TokenKind::Url),
            FunctionMatcher::of("url", self.string()),
        ])
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    fn color_words(&self) -> MatcherRef {
        KeywordMatcher::of(NAMED_COLORS.iter().copied())
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// Three or six digits.
    fn color_hex(&self) -> MatcherRef {
        TokenMatcher::of(TokenKind::Hash, |token| {
            matches!(token, CSSToken::Hash { value, .. } if is_hex_color(value, &[3, 6]))
        })
    }

    /// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
    /// and [§ 7.1 The HSL functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation),
    /// legacy comma-separated syntax.
    fn color_funcs(&self) -> Vec<MatcherRef> {
        let i = self.integer();
        let n = self.number();
        let p = self.percentage();
        vec![
            FunctionMatcher::of(
                "rgb",
                Alternative::of([
                    Quantifier::hash(i.clone(), 3, 3),
                    Quantifier::hash(p.clone(), 3, 3),
                ]),
            ),
            FunctionMatcher::of(
                "rgba",
                Alternative::of([
                    Juxtaposition::with_commas([i.clone(), i.clone(), i, n.clone()]),
                    Juxtaposition::with_commas([p.clone(), p.clone(), p.clone(), n.clone()]),
                ]),
            ),
            FunctionMatcher::of(
                "hsl",
                Juxtaposition::with_commas([n.clone(), p.clone(), p.clone()]),
            ),
            FunctionMatcher::of(
                "hsla",
                Juxtaposition::with_commas([n.clone(), p.clone(), p, n]),
            ),
        ]
    }

    /// [§ 4 Representing Colors](https://www.w3.org/TR/css-color-4/#color-type)
    fn color(&self) -> MatcherRef {
        let mut alternatives = vec![self.color_words(), self.color_hex()];
        alternatives.extend(self.color_funcs());
        Alternative::of(alternatives)
    }

    /// [§ 3 Gradients](https://www.w3.org/TR/css-images-3/#gradients)
    ///
    /// "`<image> = <url> | <gradient>`"
    fn image(&self) -> MatcherRef {
        let stop = Juxtaposition::of([
            self.color(),
            Quantifier::optional(self.length_percentage()),
        ]);
        let stops = Quantifier::hash_unbounded(stop, 2);
        let side = UnorderedGroup::some_of([
            KeywordMatcher::of(["left", "right"]),
            KeywordMatcher::of(["top", "bottom"]),
        ]);
        let direction = Alternative::of([
            self.angle(),
            self.zero(),
            Juxtaposition::of([KeywordMatcher::one("to"), side]),
        ]);
        let linear = Alternative::of([
            Juxtaposition::with_commas([direction, stops.clone()]),
            stops.clone(),
        ]);
        let shape = UnorderedGroup::some_of([
            KeywordMatcher::of(["circle", "ellipse"]),
            KeywordMatcher::of([
                "closest-side",
                "closest-corner",
                "farthest-side",
                "farthest-corner",
            ]),
        ]);
        let ending = Alternative::of([
            Juxtaposition::of([
                shape,
                Quantifier::optional(Juxtaposition::of([
                    KeywordMatcher::one("at"),
                    self.position(),
                ])),
            ]),
            Juxtaposition::of([KeywordMatcher::one("at"), self.position()]),
        ]);
        let radial = Alternative::of([
            Juxtaposition::with_commas([ending, stops.clone()]),
            stops,
        ]);
        Alternative::of([
            self.url(),
            FunctionMatcher::of("linear-gradient", linear.clone()),
            FunctionMatcher::of("repeating-linear-gradient", linear),
            FunctionMatcher::of("radial-gradient", radial.clone()),
            FunctionMatcher::of("repeating-radial-gradient", radial),
        ])
    }

    /// [§ 9.1 2D Positioning](https://www.w3.org/TR/css-values-4/#position)
    fn position(&self) -> MatcherRef {
        let lp = self.length_percentage();
        let one = Alternative::of([
            KeywordMatcher::of(["left", "center", "right", "top", "bottom"]),
            lp.clone(),
        ]);
        let two = Juxtaposition::of([
            Alternative::of([KeywordMatcher::of(["left", "center", "right"]), lp.clone()]),
            Alternative::of([KeywordMatcher::of(["top", "center", "bottom"]), lp.clone()]),
        ]);
        let four = UnorderedGroup::all_of([
            Alternative::of([
                KeywordMatcher::one("center"),
                Juxtaposition::of([
                    KeywordMatcher::of(["left", "right"]),
                    Quantifier::optional(lp.clone()),
                ]),
            ]),
            Alternative::of([
                KeywordMatcher::one("center"),
                Juxtaposition::of([
                    KeywordMatcher::of(["top", "bottom"]),
                    Quantifier::optional(lp),
                ]),
            ]),
        ]);
        Alternative::of([two, four, one])
    }

    /// [§ 2 Easing functions](https://www.w3.org/TR/css-easing-1/#easing-functions)
    fn css_single_easing_function(&self) -> MatcherRef {
        Alternative::of([
            KeywordMatcher::of([
                "linear",
                "ease",
                "ease-in",
                "ease-out",
                "ease-in-out",
                "step-start",
                "step-end",
            ]),
            FunctionMatcher::of(
                "steps",
                Juxtaposition::of([
                    self.integer(),
                    Quantifier::optional(Juxtaposition::of([
                        self.comma(),
                        KeywordMatcher::of([
                            "jump-start",
                            "jump-end",
                            "jump-none",
                            "jump-both",
                            "start",
                            "end",
                        ]),
                    ])),
                ]),
            ),
            FunctionMatcher::of("cubic-bezier", Quantifier::hash(self.number(), 4, 4)),
        ])
    }

    /// [§ 7.3 CSS-wide keywords](https://www.w3.org/TR/css-values-4/#common-keywords)
    ///
    /// "All CSS properties accept the CSS-wide keyword values as the sole
    /// component of their property value."
    fn css_wide_keywords(&self) -> MatcherRef {
        KeywordMatcher::of(CSS_WIDE_KEYWORDS.iter().copied())
    }

    /// [§ 3 Using Cascading Variables](https://www.w3.org/TR/css-variables-1/#using-variables)
    ///
    /// A bare `var( <custom-property-name> )` reference.
    fn var(&self) -> MatcherRef {
        FunctionMatcher::of("var", CustomPropertyMatcher::of())
    }
}

/// The standard primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcherFactory;

impl MatcherFactory for DefaultMatcherFactory {}

/// Primitives widened for authors of shared templates: four- and eight-digit
/// hex colors, and `var()` references anywhere inside the color functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedMatcherFactory;

impl MatcherFactory for ExtendedMatcherFactory {
    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The three-digit RGB notation (#RGB) ... The six-digit RGB notation
    /// (#RRGGBB) ... The eight-digit RGBA notation (#RRGGBBAA) ... The four-digit
    /// RGBA notation (#RGBA)"
    fn color_hex(&self) -> MatcherRef {
        TokenMatcher::of(TokenKind::Hash, |token| {
            matches!(token, CSSToken::Hash { value, .. } if is_hex_color(value, &[3, 4, 6, 8]))
        })
    }

    fn color_funcs(&self) -> Vec<MatcherRef> {
        let var = self.var();
        let i = Alternative::of([var.clone(), self.integer()]);
        let n = Alternative::of([var.clone(), self.number()]);
        let p = Alternative::of([var.clone(), self.percentage()]);
        vec![
            FunctionMatcher::of(
                "rgb",
                Alternative::of([
                    Quantifier::hash(i.clone(), 3, 3),
                    Quantifier::hash(p.clone(), 3, 3),
                    Quantifier::hash(var.clone(), 1, 3),
                ]),
            ),
            FunctionMatcher::of(
                "rgba",
                Alternative::of([
                    Juxtaposition::with_commas([i.clone(), i.clone(), i, n.clone()]),
                    Juxtaposition::with_commas([p.clone(), p.clone(), p.clone(), n.clone()]),
                    Quantifier::hash(var.clone(), 1, 4),
                    Juxtaposition::with_commas([Quantifier::hash(var.clone(), 1, 3), n.clone()]),
                ]),
            ),
            FunctionMatcher::of(
                "hsl",
                Alternative::of([
                    Juxtaposition::with_commas([n.clone(), p.clone(), p.clone()]),
                    Quantifier::hash(var.clone(), 1, 3),
                ]),
            ),
            FunctionMatcher::of(
                "hsla",
                Alternative::of([
                    Juxtaposition::with_commas([n.clone(), p.clone(), p, n]),
                    Quantifier::hash(var, 1, 4),
                ]),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::MatchContext;
    use crate::parser::ComponentValue;

    fn one(token: CSSToken) -> Vec<ComponentValue> {
        vec![ComponentValue::Token(token)]
    }

    fn function(name: &str, args: Vec<CSSToken>) -> Vec<ComponentValue> {
        vec![ComponentValue::Function {
            name: name.to_string(),
            value: args.into_iter().map(ComponentValue::Token).collect(),
        }]
    }

    fn var(name: &str) -> ComponentValue {
        ComponentValue::Function {
            name: "var".to_string(),
            value: vec![ComponentValue::Token(CSSToken::ident(name))],
        }
    }

    #[test]
    fn test_length_units_and_zero() {
        let factory = DefaultMatcherFactory;
        let length = factory.length();
        let mut ctx = MatchContext::new();
        assert!(length.matches_all(&one(CSSToken::dimension(2.0, Some(2), "PX")), &mut ctx));
        assert!(length.matches_all(&one(CSSToken::integer(0)), &mut ctx));
        assert!(!length.matches_all(&one(CSSToken::integer(3)), &mut ctx));
        assert!(!length.matches_all(&one(CSSToken::dimension(2.0, Some(2), "deg")), &mut ctx));
    }

    #[test]
    fn test_zero_is_exact() {
        let zero = DefaultMatcherFactory.zero();
        let mut ctx = MatchContext::new();
        assert!(zero.matches_all(&one(CSSToken::number(0.0)), &mut ctx));
        assert!(zero.matches_all(&one(CSSToken::number(-0.0)), &mut ctx));
        for tiny in [1e-20, -1e-20, f64::EPSILON / 2.0, f64::MIN_POSITIVE / 4.0] {
            assert!(!zero.matches_all(&one(CSSToken::number(tiny)), &mut ctx), "{tiny}");
        }
    }

    #[test]
    fn test_default_hex_lengths() {
        let color = DefaultMatcherFactory.color();
        let mut ctx = MatchContext::new();
        assert!(color.matches_all(&one(CSSToken::hash_unrestricted("fff")), &mut ctx));
        assert!(color.matches_all(&one(CSSToken::hash_unrestricted("a0b1c2")), &mut ctx));
        assert!(!color.matches_all(&one(CSSToken::hash_unrestricted("ffff")), &mut ctx));
        assert!(!color.matches_all(&one(CSSToken::hash_id("ggg")), &mut ctx));
    }

    #[test]
    fn test_extended_hex_lengths() {
        let color = ExtendedMatcherFactory.color();
        let mut ctx = MatchContext::new();
        assert!(color.matches_all(&one(CSSToken::hash_unrestricted("ffff")), &mut ctx));
        assert!(color.matches_all(&one(CSSToken::hash_unrestricted("11223344")), &mut ctx));
        assert!(!color.matches_all(&one(CSSToken::hash_unrestricted("12345")), &mut ctx));
    }

    #[test]
    fn test_rgb_legacy_syntax() {
        let color = DefaultMatcherFactory.color();
        let mut ctx = MatchContext::new();
        let rgb = function(
            "rgb",
            vec![
                CSSToken::integer(1),
                CSSToken::Comma,
                CSSToken::Whitespace,
                CSSToken::integer(2),
                CSSToken::Comma,
                CSSToken::integer(3),
            ],
        );
        assert!(color.matches_all(&rgb, &mut ctx));
        let mixed = function(
            "rgb",
            vec![
                CSSToken::integer(1),
                CSSToken::Comma,
                CSSToken::percentage(2.0, Some(2)),
                CSSToken::Comma,
                CSSToken::integer(3),
            ],
        );
        assert!(!color.matches_all(&mixed, &mut ctx));
    }

    #[test]
    fn test_var_inside_color_functions() {
        let values = vec![ComponentValue::Function {
            name: "rgba".to_string(),
            value: vec![
                var("--rgb"),
                ComponentValue::Token(CSSToken::Comma),
                ComponentValue::Token(CSSToken::number(0.5)),
            ],
        }];
        let mut ctx = MatchContext::new();
        assert!(ExtendedMatcherFactory.color().matches_all(&values, &mut ctx));
        assert!(!DefaultMatcherFactory.color().matches_all(&values, &mut ctx));
    }

    #[test]
    fn test_custom_ident_excludes_wide_keywords() {
        let ident = DefaultMatcherFactory.custom_ident();
        let mut ctx = MatchContext::new();
        assert!(ident.matches_all(&one(CSSToken::ident("fade-in")), &mut ctx));
        assert!(!ident.matches_all(&one(CSSToken::ident("inherit")), &mut ctx));
        assert!(!ident.matches_all(&one(CSSToken::ident("default")), &mut ctx));
    }

    #[test]
    fn test_position_forms() {
        let position = DefaultMatcherFactory.position();
        let mut ctx = MatchContext::new();
        let words = |ws: &[&str]| {
            let mut values = Vec::new();
            for (i, w) in ws.iter().enumerate() {
                if i > 0 {
                    values.push(ComponentValue::Token(CSSToken::Whitespace));
                }
                values.push(ComponentValue::Token(CSSToken::ident(*w)));
            }
            values
        };
        assert!(position.matches_all(&words(&["center"]), &mut ctx));
        assert!(position.matches_all(&words(&["left", "top"]), &mut ctx));
        assert!(position.matches_all(&words(&["bottom", "right"]), &mut ctx));
        assert!(!position.matches_all(&words(&["left", "right"]), &mut ctx));
    }
}
