/// A step taken by the simplifier. Each variant corresponds to one rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a + (b + c) = a + b + c`, `a * (b * c) = a * b * c`
    Flatten,

    /// `a + 0 = a`
    AddZero,

    /// `a * 0 = 0`
    MultiplyZero,

    /// `a * 1 = a`
    MultiplyOne,

    /// `2 * 3 * a = 6 * a`
    FoldNumbers,

    /// `2*a + 3*a = 5*a`
    CombineLikeTerms,

    /// `a^m * a^n = a^(m + n)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `a^1 = a`
    PowerOne,

    /// `(a^b)^n = a^(b*n)`
    PowerPower,

    /// `2^3 = 8`
    EvaluatePower,

    /// `2*(a + b) = 2*a + 2*b`
    DistributiveProperty,

    /// `(a*b)^n = a^n * b^n`
    DistributePower,

    /// `sin(0) = 0`, `sqrt(4) = 2`, ...
    EvaluateFunction,

    /// Terms were put in canonical order.
    SortTerms,

    /// Factors were put in canonical order.
    SortFactors,
}
