use y86asm::token::{Pos, TokenKind};
use y86asm::Scanner;

fn case(code: &str, expects: Vec<(TokenKind, &str)>) {
    let mut scanner = Scanner::new(code);
    let mut tokens = vec![];
    loop {
        let token = scanner.next();
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token);
    }

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} {:?}", idx, token.kind, token.text);
    }

    assert_eq!(tokens.len(), expects.len());
    for (token, (kind, text)) in tokens.iter().zip(expects) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.text, text);
    }
}

#[test]
fn empty_and_blank() {
    case("", vec![]);
    case("      \r\n \t    \t\r ", vec![]);
    case("# only a comment\n   # another", vec![]);
}

#[test]
fn identifiers() {
    use TokenKind::*;
    case("abc def", vec![(Ident, "abc"), (Ident, "def")]);
    case("abc      \r\n", vec![(Ident, "abc")]);
    case("loop_2 _start", vec![(Ident, "loop_2"), (Ident, "_start")]);
}

#[test]
fn literals() {
    use TokenKind::*;
    case("1235", vec![(Dec, "1235")]);
    case("0xa1234f", vec![(Hex, "0xa1234f")]);
    case("0XFF", vec![(Hex, "0XFF")]);
    case("0b11001", vec![(Bin, "0b11001")]);
    case("0o1234567", vec![(Oct, "0o1234567")]);
    case("0", vec![(Dec, "0")]);
}

#[test]
fn prefix_without_digits() {
    use TokenKind::*;
    case("0x", vec![(Dec, "0"), (Ident, "x")]);
    case("0b2", vec![(Dec, "0"), (Ident, "b2")]);
    case("0o9", vec![(Dec, "0"), (Ident, "o9")]);
}

#[test]
fn punctuation() {
    use TokenKind::*;
    case(
        "rmmovl %edx,1(%ecx)",
        vec![
            (Ident, "rmmovl"),
            (Percent, "%"),
            (Ident, "edx"),
            (Comma, ","),
            (Dec, "1"),
            (LParen, "("),
            (Percent, "%"),
            (Ident, "ecx"),
            (RParen, ")"),
        ],
    );
    case(
        "main: irmovl $0x10, %esp # set up stack\n.pos 0x100",
        vec![
            (Ident, "main"),
            (Colon, ":"),
            (Ident, "irmovl"),
            (Dollar, "$"),
            (Hex, "0x10"),
            (Comma, ","),
            (Percent, "%"),
            (Ident, "esp"),
            (Dot, "."),
            (Ident, "pos"),
            (Hex, "0x100"),
        ],
    );
}

#[test]
fn invalid_character() {
    use TokenKind::*;
    case("nop; halt", vec![(Ident, "nop"), (Invalid, ";"), (Ident, "halt")]);
    case("-1", vec![(Invalid, "-"), (Dec, "1")]);
}

#[test]
fn eof_is_sticky() {
    let mut scanner = Scanner::new("nop");
    assert_eq!(scanner.next().kind, TokenKind::Ident);
    for _ in 0..3 {
        assert_eq!(scanner.peek().kind, TokenKind::Eof);
        assert_eq!(scanner.next().kind, TokenKind::Eof);
    }
}

#[test]
fn peek_is_idempotent() {
    let mut scanner = Scanner::new("addl %eax");
    assert_eq!(scanner.peek().text, "addl");
    assert_eq!(scanner.peek().text, "addl");
    assert_eq!(scanner.next().text, "addl");
    assert_eq!(scanner.peek().kind, TokenKind::Percent);
}

#[test]
fn positions() {
    let mut scanner = Scanner::new("nop\n  halt\n\n\tret");
    assert_eq!(scanner.next().pos, Pos::new(1, 1));
    assert_eq!(scanner.next().pos, Pos::new(2, 3));
    assert_eq!(scanner.next().pos, Pos::new(4, 2));
}

#[test]
fn literal_values_respect_base() {
    for src in ["10", "0xa", "0b1010", "0o12"] {
        let token = Scanner::new(src).next();
        assert_eq!(token.value(), Some(10), "{src}");
    }
    assert_eq!(Scanner::new("0x100000000").next().value(), None);
    assert_eq!(Scanner::new("4294967295").next().value(), Some(u32::MAX));
}
