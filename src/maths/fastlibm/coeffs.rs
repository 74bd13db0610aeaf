/// Coefficients of the odd correction `r - t*(P1 + t*(P2 + t*(P3 + t*(P4 + t*P5))))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientSet {
    pub p1: f64,
    pub p2: f64,
    pub p3: f64,
    pub p4: f64,
    pub p5: f64,
}

impl CoefficientSet {
    pub const fn new(p1: f64, p2: f64, p3: f64, p4: f64, p5: f64) -> Self {
        Self { p1, p2, p3, p4, p5 }
    }

    /// Same tail, different leading coefficient.
    pub const fn with_p1(self, p1: f64) -> Self {
        Self { p1, ..self }
    }

    /// `P1 + t*(P2 + t*(P3 + t*(P4 + t*P5)))`
    #[inline(always)]
    pub fn horner(&self, t: f64) -> f64 {
        self.p1 + t * (self.p2 + t * (self.p3 + t * (self.p4 + t * self.p5)))
    }
}

// ========= FreeBSD msun e_exp.c minimax set =========

pub const FREEBSD: CoefficientSet = CoefficientSet::new(
    1.66666666666666019037e-01,
    -2.77777777770155933842e-03,
    6.61375632143793436117e-05,
    -1.65339022054652515390e-06,
    4.13813679705723846039e-08,
);

// ========= leading-term sweeps over the FreeBSD tail =========

pub const SIXTH: CoefficientSet = FREEBSD.with_p1(0.16666666666666666);
pub const TAIL300: CoefficientSet = FREEBSD.with_p1(0.16666666666666300);
pub const TAIL400: CoefficientSet = FREEBSD.with_p1(0.16666666666666400);
pub const TAIL500: CoefficientSet = FREEBSD.with_p1(0.16666666666666500);
pub const TAIL700: CoefficientSet = FREEBSD.with_p1(0.16666666666666700);
pub const TAIL800: CoefficientSet = FREEBSD.with_p1(0.16666666666666800);
pub const TAIL900: CoefficientSet = FREEBSD.with_p1(0.16666666666666900);
pub const TAIL996: CoefficientSet = FREEBSD.with_p1(0.16666666666666996);

// ========= truncated Taylor series of r/2 * coth(r/2) =========

pub const TAYLOR: CoefficientSet = CoefficientSet::new(
    1.0 / 6.0,
    -1.0 / 360.0,
    1.0 / 15120.0,
    -1.0 / 604800.0,
    1.0 / 23950080.0,
);

/// Every built-in set, in comparison order.
pub const NAMED_SETS: [(&str, CoefficientSet); 10] = [
    ("freebsd", FREEBSD),
    ("sixth", SIXTH),
    ("taylor", TAYLOR),
    ("tail300", TAIL300),
    ("tail400", TAIL400),
    ("tail500", TAIL500),
    ("tail700", TAIL700),
    ("tail800", TAIL800),
    ("tail900", TAIL900),
    ("tail996", TAIL996),
];
