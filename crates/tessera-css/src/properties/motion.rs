//! [CSS Transforms](https://www.w3.org/TR/css-transforms-1/),
//! [CSS Transitions](https://www.w3.org/TR/css-transitions-1/), and
//! [CSS Animations](https://www.w3.org/TR/css-animations-1/).

use super::{PropertyEntry, kw};
use crate::grammar::{
    Alternative, FunctionMatcher, Juxtaposition, MatcherFactory, MatcherRef, Quantifier,
    TokenMatcher, UnorderedGroup,
};
use crate::token::TokenKind;

/// [§ 12 The Transform Functions](https://www.w3.org/TR/css-transforms-1/#transform-functions)
///
/// With `three_d`, also the functions of
/// [Transforms Level 2 § 13](https://www.w3.org/TR/css-transforms-2/#three-d-transform-functions).
#[must_use]
pub fn transform_functions(factory: &dyn MatcherFactory, three_d: bool) -> Vec<MatcherRef> {
    let n = factory.number();
    let lp = factory.length_percentage();
    let az = Alternative::of([factory.zero(), factory.angle()]);

    let mut functions = vec![
        FunctionMatcher::of("matrix", Quantifier::hash(n.clone(), 6, 6)),
        FunctionMatcher::of("rotate", az.clone()),
        FunctionMatcher::of("scale", Quantifier::hash(n.clone(), 1, 2)),
        FunctionMatcher::of("scaleX", n.clone()),
        FunctionMatcher::of("scaleY", n.clone()),
        FunctionMatcher::of("skew", Quantifier::hash(az.clone(), 1, 2)),
        FunctionMatcher::of("skewX", az.clone()),
        FunctionMatcher::of("skewY", az.clone()),
        FunctionMatcher::of("translate", Quantifier::hash(lp.clone(), 1, 2)),
        FunctionMatcher::of("translateX", lp.clone()),
        FunctionMatcher::of("translateY", lp.clone()),
    ];
    if three_d {
        let l = factory.length();
        functions.extend([
            FunctionMatcher::of("matrix3d", Quantifier::hash(n.clone(), 16, 16)),
            FunctionMatcher::of("perspective", l.clone()),
            FunctionMatcher::of(
                "rotate3d",
                Juxtaposition::with_commas([n.clone(), n.clone(), n.clone(), az.clone()]),
            ),
            FunctionMatcher::of("rotateX", az.clone()),
            FunctionMatcher::of("rotateY", az.clone()),
            FunctionMatcher::of("rotateZ", az),
            FunctionMatcher::of("scale3d", Quantifier::hash(n.clone(), 3, 3)),
            FunctionMatcher::of("scaleZ", n),
            FunctionMatcher::of(
                "translate3d",
                Juxtaposition::with_commas([lp.clone(), lp.clone(), l]),
            ),
            FunctionMatcher::of("translateZ", lp),
        ]);
    }
    functions
}

/// `transform: none | <transform-function>+`
#[must_use]
pub(super) fn transform(factory: &dyn MatcherFactory, three_d: bool) -> MatcherRef {
    Alternative::of([
        kw(&["none"]),
        Quantifier::plus(Alternative::of(transform_functions(factory, three_d))),
    ])
}

pub(super) fn properties(factory: &dyn MatcherFactory) -> Vec<PropertyEntry> {
    let time = factory.time();
    let easing = factory.css_single_easing_function();
    let any_ident = TokenMatcher::any(TokenKind::Ident);
    let single_transition = UnorderedGroup::some_of([
        any_ident.clone(),
        time.clone(),
        easing.clone(),
        time.clone(),
    ]);

    let iteration_count = Alternative::of([kw(&["infinite"]), factory.number()]);
    let direction = kw(&["normal", "reverse", "alternate", "alternate-reverse"]);
    let fill_mode = kw(&["none", "forwards", "backwards", "both"]);
    let play_state = kw(&["running", "paused"]);
    let animation_name = Alternative::of([kw(&["none"]), factory.custom_ident(), factory.string()]);
    let single_animation = UnorderedGroup::some_of([
        time.clone(),
        easing.clone(),
        time.clone(),
        iteration_count.clone(),
        direction.clone(),
        fill_mode.clone(),
        play_state.clone(),
        animation_name.clone(),
    ]);

    let list = |m: &MatcherRef| Quantifier::hash_unbounded(m.clone(), 1);

    vec![
        ("transform", transform(factory, false)),
        (
            "transform-origin",
            Juxtaposition::of([factory.position(), Quantifier::optional(factory.length())]),
        ),
        ("perspective", Alternative::of([kw(&["none"]), factory.length()])),
        ("perspective-origin", factory.position()),
        ("backface-visibility", kw(&["visible", "hidden"])),
        (
            "transition-property",
            Alternative::of([kw(&["none"]), list(&any_ident)]),
        ),
        ("transition-duration", list(&time)),
        ("transition-delay", list(&time)),
        ("transition-timing-function", list(&easing)),
        ("transition", list(&single_transition)),
        ("animation-name", list(&animation_name)),
        ("animation-duration", list(&time)),
        ("animation-delay", list(&time)),
        ("animation-timing-function", list(&easing)),
        ("animation-iteration-count", list(&iteration_count)),
        ("animation-direction", list(&direction)),
        ("animation-fill-mode", list(&fill_mode)),
        ("animation-play-state", list(&play_state)),
        ("animation", list(&single_animation)),
    ]
}
