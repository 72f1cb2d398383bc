use crate::core::Value;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{alpha1, anychar, char, digit1, multispace0},
    combinator::{map, map_res, not, opt, peek, recognize, verify},
    sequence::{delimited, pair, terminated, tuple},
};

pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Case-insensitive keyword that must end at a word boundary, so `android`
/// never parses as `AND roid`.
pub fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(
        nom::bytes::complete::tag_no_case(kw),
        peek(not(verify(anychar, |c: &char| {
            c.is_alphanumeric() || *c == '_'
        }))),
    )
}

pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        |s: &str| s.to_string(),
    )(input)
}

// Identifier that is not a reserved keyword, so clause boundaries terminate
// field and alias lists instead of being swallowed as names.
pub fn non_keyword_identifier(input: &str) -> IResult<&str, String> {
    verify(identifier, |s: &String| {
        let upper = s.to_uppercase();
        !matches!(
            upper.as_str(),
            "SELECT"
                | "FROM"
                | "WHERE"
                | "JOIN"
                | "INNER"
                | "LEFT"
                | "ON"
                | "AND"
                | "OR"
                | "NOT"
                | "IS"
                | "NULL"
                | "TRUE"
                | "FALSE"
                | "ORDER"
                | "BY"
                | "ASC"
                | "DESC"
                | "TOP"
                | "LIMIT"
                | "AS"
        )
    })(input)
}

/// Bare or alias-qualified field name: `price` or `p.price`.
pub fn field_ref(input: &str) -> IResult<&str, String> {
    map(
        recognize(tuple((
            non_keyword_identifier,
            opt(pair(char('.'), non_keyword_identifier)),
        ))),
        |s: &str| s.to_string(),
    )(input)
}

pub fn value(input: &str) -> IResult<&str, Value> {
    alt((
        map(keyword("NULL"), |_| Value::Null),
        map(keyword("TRUE"), |_| Value::Boolean(true)),
        map(keyword("FALSE"), |_| Value::Boolean(false)),
        map(string_literal, Value::Text),
        map_res(
            recognize(tuple((
                opt(char('-')),
                digit1,
                opt(pair(char('.'), digit1)),
            ))),
            |s: &str| s.parse::<f64>().map(Value::Number),
        ),
    ))(input)
}

pub fn string_literal(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('\''), take_while(|c| c != '\''), char('\'')),
        |s: &str| s.to_string(),
    )(input)
}

pub fn integer(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(pair(opt(char('-')), take_while1(|c: char| c.is_numeric()))),
        |s: &str| s.parse::<i64>(),
    )(input)
}

/// Matches `integer` only when not followed by a fractional part, so a
/// non-integer TOP/LIMIT fails the parse instead of truncating.
pub fn whole_integer(input: &str) -> IResult<&str, i64> {
    let (rest, n) = integer(input)?;
    let (rest, ()) = peek(not(char('.')))(rest)?;
    Ok((rest, n))
}
