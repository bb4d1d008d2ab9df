//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a binding script into an AST
pub fn parse(input: &str) -> Result<Script, Vec<crate::ParseError>> {
    let len = input.len();

    let mut tokens: Vec<(Token, SimpleSpan)> = Vec::new();
    let mut errors = Vec::new();
    for item in crate::parser::lexer::lex(input) {
        match item {
            Ok((tok, span)) => tokens.push((tok, span.into())),
            Err(span) => errors.push(crate::ParseError::unexpected_input(&input[span.clone()], span)),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let token_stream = Stream::from_iter(tokens.into_iter())
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

/// Left-fold `first (op operand)*` into nested binary nodes
fn fold_binary(
    (first, rest): (Spanned<Expr>, Vec<(BinaryOp, Spanned<Expr>)>),
) -> Spanned<Expr> {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        let span = lhs.span.start..rhs.span.end;
        Spanned::new(
            Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    })
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())));

    let number = select! {
        Token::Number(n) => n,
    };

    let signed = just(Token::Minus)
        .or_not()
        .then(number)
        .map(|(neg, n)| if neg.is_some() { -n } else { n });

    // view.anchor
    let anchor_ref = identifier
        .clone()
        .then_ignore(just(Token::Dot))
        .then(identifier.clone())
        .map(|(view, anchor)| AnchorRef { view, anchor });

    let argument = choice((
        signed.clone().map(Argument::Number),
        identifier.clone().map(|id| Argument::View(id.node)),
    ))
    .map_with(|arg, e| Spanned::new(arg, span_range(&e.span())));

    // .method(argument?)
    let call = just(Token::Dot)
        .ignore_then(identifier.clone())
        .then(
            argument
                .or_not()
                .delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        )
        .map_with(|(method, argument), e| (method, argument, span_range(&e.span())));

    let expr = recursive(|expr| {
        let atom = choice((
            signed
                .clone()
                .map_with(|n, e| Spanned::new(Expr::Number(n), span_range(&e.span()))),
            just(Token::Myself).map_with(|_, e| Spanned::new(Expr::Myself, span_range(&e.span()))),
            anchor_ref
                .clone()
                .map_with(|r, e| Spanned::new(Expr::Anchor(r), span_range(&e.span()))),
            expr.delimited_by(just(Token::ParenOpen), just(Token::ParenClose)),
        ));

        let postfix = atom
            .then(call.clone().repeated().collect::<Vec<_>>())
            .map(|(receiver, calls)| {
                calls
                    .into_iter()
                    .fold(receiver, |receiver, (method, argument, span)| {
                        let span = receiver.span.start..span.end;
                        Spanned::new(
                            Expr::Call {
                                receiver: Box::new(receiver),
                                method,
                                argument,
                            },
                            span,
                        )
                    })
            });

        let product_op = choice((
            just(Token::Star).to(BinaryOp::Mul),
            just(Token::Slash).to(BinaryOp::Div),
        ));
        let product = postfix
            .clone()
            .then(product_op.then(postfix).repeated().collect::<Vec<_>>())
            .map(fold_binary);

        let sum_op = choice((
            just(Token::Plus).to(BinaryOp::Add),
            just(Token::Minus).to(BinaryOp::Sub),
        ));
        product
            .clone()
            .then(sum_op.then(product).repeated().collect::<Vec<_>>())
            .map(fold_binary)
            .boxed()
    });

    // view name [in parent]
    let view_decl = just(Token::View)
        .ignore_then(identifier.clone())
        .then(just(Token::In).ignore_then(identifier).or_not())
        .map(|(name, parent)| Statement::View(ViewDecl { name, parent }));

    // view.anchor = expr
    let bind_decl = anchor_ref
        .then_ignore(just(Token::Equals))
        .then(expr)
        .map(|(target, value)| Statement::Bind(BindDecl { target, value }));

    choice((view_decl, bind_decl))
        .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Script { statements })
}
