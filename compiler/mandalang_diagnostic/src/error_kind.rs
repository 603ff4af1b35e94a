//! Error kinds for every Mandalang pipeline stage.
//!
//! Grouped by phase, matching the taxonomy in the language spec: resource errors first, then
//! one group per pipeline stage (scanning, parsing, resolution, typing, evaluation).

use std::fmt;

/// The kind of error a pipeline stage failed with.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    // Resource errors.
    /// An arena or static bound (e.g. the 16-parameter cap) was exceeded.
    NotEnoughMemory,

    // Scanning errors (§4.1).
    InvalidCharacter,
    InvalidNumber,
    InvalidOperator,

    // Parsing errors (§4.2).
    InvalidExpression,
    UnclosedParenthesisInExpression,
    ExpectedValueName,
    ExpectedTypeName,
    ExpectedEquals,
    ExpectedLeftParenthesis,
    ExpectedRightParenthesis,
    ExpectedArrow,
    ExpectedParameterName,
    ExpectedExpressionAfterFunctionHeader,
    ExpectedArgumentOrRightParenthesis,
    ExpectedCommaOrRightParenthesis,
    ExpectedKeywordThen,
    ExpectedKeywordElse,
    ExpectedLeftSquareBrace,
    ExpectedRightSquareBrace,
    InvalidTypeSyntax,

    // Resolution errors (§4.3).
    UnknownName,
    DuplicatedName,
    NameIsNotFoundToImport,
    TypeNameExpected,
    InvalidAstNodeToResolve,

    // Typing errors (§4.4).
    UnaryMinusShouldHaveNumericalOperand,
    BooleanNotShouldHaveBooleanOperand,
    OperandsShouldHaveSameType,
    OperandsShouldHaveNumericalTypes,
    OperandsShouldHaveBooleanType,
    MismatchFunctionTypeAndExpression,
    ExpectedFunctionToCall,
    MismatchParametersAndArgumentsCount,
    MismatchParameterAndArgumentTypes,
    ConditionShouldBeBoolean,
    ConditionalExpressionTypesMismatch,
    InvalidTypeResolving,
    InvalidAstNodeToSolveType,

    // Evaluation errors (§4.5).
    InvalidAstNodeToEvaluate,
    InvalidSymbol,
    InvalidSymbolToEvaluate,
    InvalidStackOperation,
    DivisionByZero,
}

impl ErrorKind {
    /// The canonical human-readable message for this kind, independent of any detail/line.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::NotEnoughMemory => "Not enough memory",

            ErrorKind::InvalidCharacter => "Invalid character",
            ErrorKind::InvalidNumber => "Invalid number",
            ErrorKind::InvalidOperator => "Invalid operator",

            ErrorKind::InvalidExpression => "Invalid expression",
            ErrorKind::UnclosedParenthesisInExpression => "Unclosed parenthesis in expression",
            ErrorKind::ExpectedValueName => "Expected value name",
            ErrorKind::ExpectedTypeName => "Expected type name",
            ErrorKind::ExpectedEquals => "Expected '='",
            ErrorKind::ExpectedLeftParenthesis => "Expected '('",
            ErrorKind::ExpectedRightParenthesis => "Expected ')'",
            ErrorKind::ExpectedArrow => "Expected '->'",
            ErrorKind::ExpectedParameterName => "Expected parameter name",
            ErrorKind::ExpectedExpressionAfterFunctionHeader => {
                "Expected expression after function header"
            }
            ErrorKind::ExpectedArgumentOrRightParenthesis => {
                "Expected argument or ')'"
            }
            ErrorKind::ExpectedCommaOrRightParenthesis => "Expected ',' or ')'",
            ErrorKind::ExpectedKeywordThen => "Expected 'then'",
            ErrorKind::ExpectedKeywordElse => "Expected 'else'",
            ErrorKind::ExpectedLeftSquareBrace => "Expected '['",
            ErrorKind::ExpectedRightSquareBrace => "Expected ']'",
            ErrorKind::InvalidTypeSyntax => "Invalid type syntax",

            ErrorKind::UnknownName => "Unknown name",
            ErrorKind::DuplicatedName => "Duplicated name",
            ErrorKind::NameIsNotFoundToImport => "Name is not found to import",
            ErrorKind::TypeNameExpected => "Type name expected",
            ErrorKind::InvalidAstNodeToResolve => "Invalid AST node to resolve",

            ErrorKind::UnaryMinusShouldHaveNumericalOperand => {
                "Unary minus should have numerical operand"
            }
            ErrorKind::BooleanNotShouldHaveBooleanOperand => {
                "Boolean not should have boolean operand"
            }
            ErrorKind::OperandsShouldHaveSameType => "Operands should have same type",
            ErrorKind::OperandsShouldHaveNumericalTypes => "Operands should have numerical types",
            ErrorKind::OperandsShouldHaveBooleanType => "Operands should have boolean type",
            ErrorKind::MismatchFunctionTypeAndExpression => {
                "Mismatch between function type and expression"
            }
            ErrorKind::ExpectedFunctionToCall => "Expected function to call",
            ErrorKind::MismatchParametersAndArgumentsCount => {
                "Mismatch between parameters and arguments count"
            }
            ErrorKind::MismatchParameterAndArgumentTypes => {
                "Mismatch between parameter and argument types"
            }
            ErrorKind::ConditionShouldBeBoolean => "Expression after 'if' should be boolean",
            ErrorKind::ConditionalExpressionTypesMismatch => {
                "Conditional expression branch types mismatch"
            }
            ErrorKind::InvalidTypeResolving => "Invalid type resolving",
            ErrorKind::InvalidAstNodeToSolveType => "Invalid AST node to solve type",

            ErrorKind::InvalidAstNodeToEvaluate => "Invalid AST node to evaluate",
            ErrorKind::InvalidSymbol => "Invalid symbol",
            ErrorKind::InvalidSymbolToEvaluate => "Invalid symbol to evaluate",
            ErrorKind::InvalidStackOperation => "Invalid stack operation",
            ErrorKind::DivisionByZero => "Division by zero",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
