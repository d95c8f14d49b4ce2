//! Resolved syntax tree for formulas.
//!
//! Names, attributes and functions are resolved to closed enums while
//! parsing, so a compiled formula cannot refer to anything outside the
//! measurement context.

use crate::value::Value;

/// The variables a formula may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    Type,
    Shape,
    Length,
    LengthUom,
    Height,
    HeightUom,
    Width,
    WidthUom,
    Diameter,
    DiameterUom,
    Weight,
    WeightUom,
    Density,
    DensityWeightUom,
    DensityVolumeUom,
}

impl Variable {
    pub const ALL: [Variable; 15] = [
        Variable::Type,
        Variable::Shape,
        Variable::Length,
        Variable::LengthUom,
        Variable::Height,
        Variable::HeightUom,
        Variable::Width,
        Variable::WidthUom,
        Variable::Diameter,
        Variable::DiameterUom,
        Variable::Weight,
        Variable::WeightUom,
        Variable::Density,
        Variable::DensityWeightUom,
        Variable::DensityVolumeUom,
    ];

    /// The name used in formula source.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Shape => "shape",
            Self::Length => "length",
            Self::LengthUom => "length_uom",
            Self::Height => "height",
            Self::HeightUom => "height_uom",
            Self::Width => "width",
            Self::WidthUom => "width_uom",
            Self::Diameter => "diameter",
            Self::DiameterUom => "diameter_uom",
            Self::Weight => "weight",
            Self::WeightUom => "weight_uom",
            Self::Density => "density",
            Self::DensityWeightUom => "density_weight_uom",
            Self::DensityVolumeUom => "density_volume_uom",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Readable attributes of a unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Id,
    Name,
    Symbol,
    Factor,
    Rounding,
    Digits,
    Category,
}

impl Attribute {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Factor => "factor",
            Self::Rounding => "rounding",
            Self::Digits => "digits",
            Self::Category => "category",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Id,
            Self::Name,
            Self::Symbol,
            Self::Factor,
            Self::Rounding,
            Self::Digits,
            Self::Category,
        ]
        .into_iter()
        .find(|a| a.name() == name)
    }
}

/// Functions callable from a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Str,
    Round,
    Int,
    Float,
    Abs,
    Len,
    Min,
    Max,
    Bool,
}

impl Builtin {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Round => "round",
            Self::Int => "int",
            Self::Float => "float",
            Self::Abs => "abs",
            Self::Len => "len",
            Self::Min => "min",
            Self::Max => "max",
            Self::Bool => "bool",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Str,
            Self::Round,
            Self::Int,
            Self::Float,
            Self::Abs,
            Self::Len,
            Self::Min,
            Self::Max,
            Self::Bool,
        ]
        .into_iter()
        .find(|b| b.name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Is,
    IsNot,
}

impl CmpOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Is => "is",
            Self::IsNot => "is not",
        }
    }
}

/// A formula expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(Variable),
    Attribute {
        object: Box<Expr>,
        attribute: Attribute,
    },
    Call {
        function: Builtin,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A comparison chain: `a < b <= c` holds when every link holds.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CmpOp, Expr)>,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Conditional {
        condition: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    /// Tuple or list display.
    Sequence(Vec<Expr>),
}
