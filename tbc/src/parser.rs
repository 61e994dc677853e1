//! Per-line recursive descent over token slices.
//!
//! Every production takes a token slice and answers with a lexical-tree node
//! or no match; the left-recursive binary rules share one split-scan helper.
//! Errors are non-fatal: a line that parses as nothing raises a record and
//! parsing continues on the next line.

use matches::debug_assert_matches;
use tbvm::{is_boolean, is_float, is_integer, ErrorKind, Opcode, ProgramError};

use crate::ast::{arg_count, LexNode, Symbol, Terminal};
use crate::codegen::is_function_name;
use crate::symbols::SymbolTable;
use crate::token::Tokens;

pub(crate) fn raise(errors: &mut Vec<ProgramError>, kind: ErrorKind, line: usize) {
    errors.push(ProgramError::new(kind, line));
}

/// Tokenizes the program and parses it line by line into the symbol table's
/// lexical tree.
pub(crate) fn parse_program(source: &str, errors: &mut Vec<ProgramError>) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut line = 1;
    let mut tokens: Vec<&str> = Vec::new();

    for span in Tokens::new(source) {
        let text = span.text(source);
        if text == "\n" {
            parse_into(&tokens, &mut table, line, errors);
            tokens.clear();
            line += 1;
        } else {
            tokens.push(text);
        }
    }
    parse_into(&tokens, &mut table, line, errors);

    table
}

fn parse_into(
    tokens: &[&str],
    table: &mut SymbolTable,
    line: usize,
    errors: &mut Vec<ProgramError>,
) {
    if tokens.is_empty() {
        return;
    }
    if let Some(node) = parse_line(tokens, table, line, errors) {
        table.lex_tree.push(node);
    }
}

/// Parses one line: a declaration, or failing that a statement.
pub(crate) fn parse_line(
    tokens: &[&str],
    table: &mut SymbolTable,
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    for token in tokens {
        if !recognized(token) {
            raise(errors, ErrorKind::UnknownToken, line);
            return None;
        }
    }
    // Literals that cannot be represented poison the whole line.
    for token in tokens {
        if is_integer(token) && token.parse::<i32>().is_err() {
            raise(errors, ErrorKind::ParseInt, line);
            return None;
        }
        if is_float(token) && token.parse::<f32>().is_err() {
            raise(errors, ErrorKind::ParseFloat, line);
            return None;
        }
    }

    if let Some(node) = is_declaration(tokens, line, errors) {
        return Some(node);
    }
    is_statement(tokens, table, line, errors)
}

fn recognized(token: &str) -> bool {
    is_separator(token)
        || token.parse::<Opcode>().is_ok()
        || is_integer(token)
        || is_float(token)
        || is_boolean(token)
        || is_string_lit(token)
        || is_name_shaped(token)
}

fn is_separator(token: &str) -> bool {
    token == "(" || token == ")" || token == "," || token == ":"
}

/// Alphabetic start and alphanumeric tail; reserved words still count here.
fn is_name_shaped(token: &str) -> bool {
    let mut bytes = token.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() => bytes.all(|b| b.is_ascii_alphanumeric()),
        _ => false,
    }
}

pub(crate) fn is_string_lit(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// A valid variable name: name-shaped and not a reserved word or boolean
/// literal.
pub(crate) fn is_id(token: &str) -> bool {
    is_name_shaped(token) && token.parse::<Opcode>().is_err() && !is_boolean(token)
}

fn is_declaration(
    tokens: &[&str],
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    if tokens.len() < 2 || tokens[1] != "=" {
        return None;
    }
    if !is_id(tokens[0]) {
        raise(errors, ErrorKind::InvalidID, line);
        return None;
    }
    let expression = match is_expression(&tokens[2..], line) {
        Some(node) => node,
        None => {
            raise(errors, ErrorKind::Assignment, line);
            return None;
        }
    };

    let mut node = LexNode::symbol(Symbol::Declaration, line);
    node.left = Some(Box::new(LexNode::terminal(
        Terminal::Variable(tokens[0].to_string()),
        line,
    )));
    node.middle = Some(Box::new(LexNode::op(Opcode::Set, line)));
    node.right = Some(Box::new(expression));
    Some(node)
}

fn is_statement(
    tokens: &[&str],
    table: &mut SymbolTable,
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    match tokens[0] {
        "if" => {
            let node = is_keyword_bool(tokens, Symbol::If, line, errors)?;
            table.block_depth += 1;
            Some(node)
        }
        "elif" => {
            if table.block_depth == 0 {
                raise(errors, ErrorKind::BlockMismatch, line);
                return None;
            }
            is_keyword_bool(tokens, Symbol::Elif, line, errors)
        }
        "else" => {
            if table.block_depth == 0 {
                raise(errors, ErrorKind::BlockMismatch, line);
                None
            } else if tokens.len() != 1 {
                raise(errors, ErrorKind::UnknownLine, line);
                None
            } else {
                Some(LexNode::symbol(Symbol::Else, line))
            }
        }
        "end" => {
            if table.block_depth == 0 {
                raise(errors, ErrorKind::BlockMismatch, line);
                None
            } else if tokens.len() != 1 {
                raise(errors, ErrorKind::UnknownLine, line);
                None
            } else {
                table.block_depth -= 1;
                Some(LexNode::symbol(Symbol::End, line))
            }
        }
        "while" => {
            let node = is_keyword_bool(tokens, Symbol::While, line, errors)?;
            table.block_depth += 1;
            Some(node)
        }
        "for" => {
            let node = is_statement_for(tokens, line, errors)?;
            table.block_depth += 1;
            Some(node)
        }
        "goto" => is_statement_goto(tokens, line, errors),
        "label" => is_statement_label(tokens, line, errors),
        _ => match is_expression(tokens, line) {
            Some(node) => Some(node),
            None => {
                raise(errors, ErrorKind::UnknownLine, line);
                None
            }
        },
    }
}

/// Shared rule for the `keyword '(' Bool ')'` statements.
fn is_keyword_bool(
    tokens: &[&str],
    symbol: Symbol,
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    debug_assert_matches!(symbol, Symbol::If | Symbol::Elif | Symbol::While);

    if tokens.len() < 3 || tokens[1] != "(" || tokens[tokens.len() - 1] != ")" {
        raise(errors, ErrorKind::ParenthMismatch, line);
        return None;
    }
    let condition = match is_bool(&tokens[2..tokens.len() - 1], line) {
        Some(node) => node,
        None => {
            raise(errors, ErrorKind::UnknownLine, line);
            return None;
        }
    };

    let mut node = LexNode::symbol(symbol, line);
    node.middle = Some(Box::new(condition));
    Some(node)
}

fn is_statement_for(
    tokens: &[&str],
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    if tokens.len() < 4 || tokens[1] != "(" || tokens[tokens.len() - 1] != ")" {
        raise(errors, ErrorKind::ParenthMismatch, line);
        return None;
    }
    let inner = &tokens[2..tokens.len() - 1];
    if inner.len() < 3 || inner[1] != "," {
        raise(errors, ErrorKind::MissingArgs, line);
        return None;
    }
    if !is_id(inner[0]) {
        raise(errors, ErrorKind::TypeMismatch, line);
        return None;
    }
    let bounds = match is_expression_list(&inner[2..], line) {
        Some(list) => list,
        None => {
            raise(errors, ErrorKind::MissingArgs, line);
            return None;
        }
    };
    if arg_count(&bounds) != 3 {
        raise(errors, ErrorKind::MissingArgs, line);
        return None;
    }

    let mut node = LexNode::symbol(Symbol::For, line);
    node.left = Some(Box::new(LexNode::terminal(
        Terminal::Variable(inner[0].to_string()),
        line,
    )));
    node.middle = Some(Box::new(bounds));
    Some(node)
}

fn is_statement_goto(
    tokens: &[&str],
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    if tokens.len() != 2 {
        raise(errors, ErrorKind::MissingArgs, line);
        return None;
    }
    if !is_id(tokens[1]) {
        raise(errors, ErrorKind::InvalidID, line);
        return None;
    }
    let mut node = LexNode::symbol(Symbol::Goto, line);
    node.middle = Some(Box::new(LexNode::terminal(
        Terminal::Variable(tokens[1].to_string()),
        line,
    )));
    Some(node)
}

fn is_statement_label(
    tokens: &[&str],
    line: usize,
    errors: &mut Vec<ProgramError>,
) -> Option<LexNode> {
    if tokens.len() != 3 || tokens[2] != ":" {
        raise(errors, ErrorKind::UnknownLine, line);
        return None;
    }
    if !is_id(tokens[1]) {
        raise(errors, ErrorKind::InvalidID, line);
        return None;
    }
    let mut node = LexNode::symbol(Symbol::Label, line);
    node.middle = Some(Box::new(LexNode::terminal(
        Terminal::Variable(tokens[1].to_string()),
        line,
    )));
    Some(node)
}

type Production = fn(&[&str], usize) -> Option<LexNode>;

/// Shared helper for the left-recursive binary rules.
///
/// Scans delimiter positions left to right and accepts the first split where
/// both sides parse; splits landing inside parentheses fail to parse and the
/// scan moves on. Falls through to the optional third rule when no split
/// works.
fn binary_production(
    tokens: &[&str],
    line: usize,
    delims: &[&str],
    left_rule: Production,
    right_rule: Production,
    fall_through: Option<Production>,
) -> Option<LexNode> {
    for (i, token) in tokens.iter().enumerate() {
        if i == 0 || i + 1 == tokens.len() || !delims.contains(token) {
            continue;
        }
        if let Some(left) = left_rule(&tokens[..i], line) {
            if let Some(right) = right_rule(&tokens[i + 1..], line) {
                let op = token.parse::<Opcode>().ok()?;
                return Some(LexNode::binary(op, left, right, line));
            }
        }
    }
    fall_through.and_then(|rule| rule(tokens, line))
}

fn is_bool(tokens: &[&str], line: usize) -> Option<LexNode> {
    binary_production(tokens, line, &["or"], is_bool, is_join, Some(is_join))
}

fn is_join(tokens: &[&str], line: usize) -> Option<LexNode> {
    binary_production(tokens, line, &["and"], is_join, is_equality, Some(is_equality))
}

fn is_equality(tokens: &[&str], line: usize) -> Option<LexNode> {
    binary_production(
        tokens,
        line,
        &["==", "!=", "<", "<=", ">", ">="],
        is_expression,
        is_expression,
        Some(is_expression),
    )
}

fn is_expression(tokens: &[&str], line: usize) -> Option<LexNode> {
    if tokens.is_empty() {
        return None;
    }
    if let Some(node) =
        binary_production(tokens, line, &["+", "-"], is_expression, is_term, None)
    {
        return Some(node);
    }
    if let Some(node) = is_call(tokens, line) {
        return Some(node);
    }
    is_term(tokens, line)
}

/// `ID '(' ExpressionList ')'` — names are checked against the builtin table
/// at compile time, so any well-formed name is accepted here.
fn is_call(tokens: &[&str], line: usize) -> Option<LexNode> {
    if tokens.len() < 3 || tokens[1] != "(" || tokens[tokens.len() - 1] != ")" {
        return None;
    }
    let name = tokens[0];
    if !is_id(name) && !is_function_name(name) {
        return None;
    }
    let arguments = is_expression_list(&tokens[2..tokens.len() - 1], line)?;

    let mut node = LexNode::terminal(Terminal::Function(name.to_string()), line);
    node.middle = Some(Box::new(arguments));
    Some(node)
}

/// Builds the right-recursive argument chain. The chain stores the last
/// argument first so that the left-right-middle emission order replays the
/// source order; the tail is a `None` symbol.
fn is_expression_list(tokens: &[&str], line: usize) -> Option<LexNode> {
    if tokens.is_empty() {
        return Some(LexNode::symbol(Symbol::None, line));
    }
    for (i, token) in tokens.iter().enumerate() {
        if i == 0 || i + 1 == tokens.len() || *token != "," {
            continue;
        }
        if let Some(head) = is_expression_list(&tokens[..i], line) {
            if let Some(last) = is_expression(&tokens[i + 1..], line) {
                let mut node = LexNode::symbol(Symbol::ExpressionList, line);
                node.middle = Some(Box::new(last));
                node.right = Some(Box::new(head));
                return Some(node);
            }
        }
    }

    let expression = is_expression(tokens, line)?;
    let mut node = LexNode::symbol(Symbol::ExpressionList, line);
    node.middle = Some(Box::new(expression));
    node.right = Some(Box::new(LexNode::symbol(Symbol::None, line)));
    Some(node)
}

fn is_term(tokens: &[&str], line: usize) -> Option<LexNode> {
    binary_production(
        tokens,
        line,
        &["*", "/", "%"],
        is_term,
        is_unary,
        Some(is_unary),
    )
}

fn is_unary(tokens: &[&str], line: usize) -> Option<LexNode> {
    if tokens.len() >= 2 && (tokens[0] == "!" || tokens[0] == "-") {
        let operand = is_unary(&tokens[1..], line)?;
        let op = if tokens[0] == "!" {
            Opcode::Not
        } else {
            Opcode::Sub
        };
        return Some(LexNode::unary(op, operand, line));
    }
    is_factor(tokens, line)
}

fn is_factor(tokens: &[&str], line: usize) -> Option<LexNode> {
    if tokens.len() == 1 {
        let token = tokens[0];
        return if is_boolean(token) {
            Some(LexNode::terminal(Terminal::Bool(token == "true"), line))
        } else if is_integer(token) {
            token
                .parse()
                .ok()
                .map(|v| LexNode::terminal(Terminal::Int(v), line))
        } else if is_float(token) {
            token
                .parse()
                .ok()
                .map(|v| LexNode::terminal(Terminal::Float(v), line))
        } else if is_string_lit(token) {
            Some(LexNode::terminal(
                Terminal::StringLit(token[1..token.len() - 1].to_string()),
                line,
            ))
        } else if is_id(token) {
            Some(LexNode::terminal(Terminal::Variable(token.to_string()), line))
        } else {
            None
        };
    }

    // '(' Bool ')' grouping
    if tokens.len() >= 3 && tokens[0] == "(" && tokens[tokens.len() - 1] == ")" {
        let inner = is_bool(&tokens[1..tokens.len() - 1], line)?;
        let mut node = LexNode::symbol(Symbol::Expression, line);
        node.middle = Some(Box::new(inner));
        return Some(node);
    }
    None
}
