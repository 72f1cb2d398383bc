use super::common::{field_ref, identifier, keyword, non_keyword_identifier, value, whole_integer, ws};
use super::statement::{
    CompareOp, Condition, JoinKind, JoinSpec, Operand, OrderKey, QueryPlan, SelectItem, SortOrder,
    TableRef,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

fn operand(input: &str) -> IResult<&str, Operand> {
    alt((map(value, Operand::Literal), map(field_ref, Operand::Field)))(input)
}

// Parse a leaf condition: operand <op> operand, field IS [NOT] NULL, NOT term,
// or a parenthesized tree.
fn condition_term(input: &str) -> IResult<&str, Condition> {
    alt((
        map(preceded(ws(keyword("NOT")), condition_term), |inner| {
            Condition::Not(Box::new(inner))
        }),
        delimited(ws(char('(')), condition, ws(char(')'))),
        // IS NULL / IS NOT NULL desugar to comparison against a literal NULL,
        // the one comparison shape that matches Null values.
        map(
            tuple((
                ws(field_ref),
                ws(keyword("IS")),
                ws(keyword("NOT")),
                ws(keyword("NULL")),
            )),
            |(field, _, _, _)| Condition::Compare {
                left: Operand::Field(field),
                op: CompareOp::NotEq,
                right: Operand::Literal(crate::core::Value::Null),
            },
        ),
        map(
            tuple((ws(field_ref), ws(keyword("IS")), ws(keyword("NULL")))),
            |(field, _, _)| Condition::Compare {
                left: Operand::Field(field),
                op: CompareOp::Eq,
                right: Operand::Literal(crate::core::Value::Null),
            },
        ),
        map(
            tuple((
                ws(operand),
                ws(alt((
                    map(tag(">="), |_| CompareOp::GtEq),
                    map(tag("<="), |_| CompareOp::LtEq),
                    map(tag("!="), |_| CompareOp::NotEq),
                    map(tag("<>"), |_| CompareOp::NotEq),
                    map(tag("="), |_| CompareOp::Eq),
                    map(tag(">"), |_| CompareOp::Gt),
                    map(tag("<"), |_| CompareOp::Lt),
                ))),
                ws(operand),
            )),
            |(left, op, right)| Condition::Compare { left, op, right },
        ),
    ))(input)
}

// AND binds tighter than OR; consecutive terms flatten into one child list.
fn condition_and(input: &str) -> IResult<&str, Condition> {
    map(
        separated_list1(ws(keyword("AND")), condition_term),
        |mut children| {
            if children.len() == 1 {
                children.remove(0)
            } else {
                Condition::And(children)
            }
        },
    )(input)
}

pub fn condition(input: &str) -> IResult<&str, Condition> {
    map(
        separated_list1(ws(keyword("OR")), condition_and),
        |mut children| {
            if children.len() == 1 {
                children.remove(0)
            } else {
                Condition::Or(children)
            }
        },
    )(input)
}

// Parse a select item: `*`, or a field with optional [AS] output alias.
fn select_item(input: &str) -> IResult<&str, SelectItem> {
    alt((
        map(ws(char('*')), |_| SelectItem::Wildcard),
        map(
            tuple((
                ws(field_ref),
                opt(alt((
                    preceded(ws(keyword("AS")), ws(identifier)),
                    ws(non_keyword_identifier),
                ))),
            )),
            |(field, output)| SelectItem::Field { field, output },
        ),
    ))(input)
}

// Parse `table [alias]`.
fn table_ref(input: &str) -> IResult<&str, TableRef> {
    map(
        tuple((ws(non_keyword_identifier), opt(ws(non_keyword_identifier)))),
        |(table, alias)| TableRef::new(table, alias),
    )(input)
}

// Parse [INNER|LEFT] JOIN table [alias] ON left.field = right.field
pub fn join_clause(input: &str) -> IResult<&str, JoinSpec> {
    let (input, kind) = alt((
        map(tuple((ws(keyword("INNER")), ws(keyword("JOIN")))), |_| {
            JoinKind::Inner
        }),
        map(tuple((ws(keyword("LEFT")), ws(keyword("JOIN")))), |_| {
            JoinKind::Left
        }),
        map(ws(keyword("JOIN")), |_| JoinKind::Inner),
    ))(input)?;

    let (input, table) = table_ref(input)?;
    let (input, _) = ws(keyword("ON"))(input)?;
    let (input, left) = ws(field_ref)(input)?;
    let (input, _) = ws(char('='))(input)?;
    let (input, right) = ws(field_ref)(input)?;

    Ok((
        input,
        JoinSpec {
            kind,
            table,
            on: Condition::Compare {
                left: Operand::Field(left),
                op: CompareOp::Eq,
                right: Operand::Field(right),
            },
        },
    ))
}

pub fn where_clause(input: &str) -> IResult<&str, Option<Condition>> {
    opt(preceded(ws(keyword("WHERE")), condition))(input)
}

fn order_key(input: &str) -> IResult<&str, OrderKey> {
    map(
        tuple((
            ws(field_ref),
            opt(alt((
                map(ws(keyword("ASC")), |_| SortOrder::Asc),
                map(ws(keyword("DESC")), |_| SortOrder::Desc),
            ))),
        )),
        |(field, order)| OrderKey { field, order: order.unwrap_or(SortOrder::Asc) },
    )(input)
}

pub fn order_by(input: &str) -> IResult<&str, Vec<OrderKey>> {
    map(
        opt(preceded(
            tuple((ws(keyword("ORDER")), ws(keyword("BY")))),
            separated_list1(ws(char(',')), order_key),
        )),
        Option::unwrap_or_default,
    )(input)
}

pub fn limit(input: &str) -> IResult<&str, Option<i64>> {
    opt(preceded(ws(keyword("LIMIT")), ws(whole_integer)))(input)
}

fn top(input: &str) -> IResult<&str, Option<i64>> {
    opt(preceded(ws(keyword("TOP")), ws(whole_integer)))(input)
}

pub fn select(input: &str) -> IResult<&str, QueryPlan> {
    let (input, _) = ws(keyword("SELECT"))(input)?;
    let (input, top_n) = top(input)?;
    let (input, select_items) = separated_list1(ws(char(',')), select_item)(input)?;
    let (input, _) = ws(keyword("FROM"))(input)?;
    let (input, from) = table_ref(input)?;
    let (input, joins) = many0(join_clause)(input)?;
    let (input, filter) = where_clause(input)?;
    let (input, order_keys) = order_by(input)?;
    let (input, limit_n) = limit(input)?;

    // TOP and LIMIT are two spellings of the same clause; giving both is
    // rejected rather than picking one.
    if top_n.is_some() && limit_n.is_some() {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }

    Ok((
        input,
        QueryPlan {
            from,
            joins,
            filter,
            select: select_items,
            order_by: order_keys,
            limit: top_n.or(limit_n),
        },
    ))
}
