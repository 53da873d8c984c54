use arch::Opcode;
use y86asm::{assemble, Assembler, Error};

const NULLARY: [(&str, u8); 3] = [("nop", 0x00), ("halt", 0x10), ("ret", 0x90)];

fn case(src: &str, expect: &[u8]) {
    match assemble(src) {
        Ok(bin) => assert_eq!(bin, expect, "{src:?}"),
        Err(err) => panic!("{src:?}: {err}"),
    }
}

fn le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

#[test]
fn nullary_is_one_byte() {
    for (name, byte) in NULLARY {
        case(name, &[byte]);
        assert_eq!(Opcode::parse(name).map(Opcode::code), Ok(byte));
    }
}

#[test]
fn scenarios() {
    case("nop", b"\x00");
    case("pushl %eax", b"\xa0\x08");
    case("addl %eax,%ecx", b"\x60\x01");
    case("rmmovl %edx,1(%ecx)", b"\x40\x21\x01\x00\x00\x00");

    let mut irmovl = vec![0x30, 0x80];
    irmovl.extend(le(12345));
    case("irmovl $12345,%eax", &irmovl);
}

#[test]
fn every_shape() {
    case("popl %esp", &[0xB0, 0x48]);
    case("rrmovl %esp, %ebp", &[0x20, 0x45]);
    case("subl %ebx, %edx", &[0x61, 0x32]);
    case("andl %esi, %edi", &[0x62, 0x67]);
    case("xorl %edi, %eax", &[0x63, 0x70]);
    case("mrmovl 8(%ebp), %eax", &[0x50, 0x05, 0x08, 0x00, 0x00, 0x00]);
    case("l: call l", &[0x80, 0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn length_is_sum_of_shapes_in_source_order() {
    let src = "
        irmovl $1, %eax     # 6
        addl %eax, %ebx     # 2
        pushl %ebx          # 2
        rmmovl %eax, 4(%esp)# 6
        mrmovl 4(%esp), %ecx# 6
        popl %ebx           # 2
        nop                 # 1
        halt                # 1
    ";
    let bin = assemble(src).unwrap();
    assert_eq!(bin.len(), 6 + 2 + 2 + 6 + 6 + 2 + 1 + 1);
    let heads = [0, 6, 8, 10, 16, 22, 24, 25];
    let ops = [0x30, 0x60, 0xA0, 0x40, 0x50, 0xB0, 0x00, 0x10];
    for (head, op) in heads.iter().zip(ops) {
        assert_eq!(bin[*head], op);
    }
}

#[test]
fn numeric_base_fidelity() {
    for lit in ["10", "0xa", "0b1010", "0o12"] {
        let bin = assemble(&format!("irmovl ${lit}, %eax")).unwrap();
        assert_eq!(&bin[2..], &[0x0a, 0x00, 0x00, 0x00], "{lit}");

        let bin = assemble(&format!("rmmovl %eax, {lit}(%ebx)")).unwrap();
        assert_eq!(&bin[2..], &[0x0a, 0x00, 0x00, 0x00], "{lit}");
    }
}

#[test]
fn jump_to_defined_label() {
    let mut expect = vec![0x70];
    expect.extend(le(5));
    expect.push(0x10);
    case("jmp L\nL: halt", &expect);
}

#[test]
fn undefined_label_yields_no_output() {
    match assemble("jmp target\nL: halt") {
        Err(Error::UndefinedLabel(name, pos)) => {
            assert_eq!(name, "target");
            assert_eq!((pos.line, pos.col), (1, 1));
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn forward_and_backward_references_agree() {
    // Same structural position of `L` (offset 7), reached from before and after.
    let forward = assemble("jmp L\nnop\nnop\nL: halt\njmp L").unwrap();
    let backward = assemble("nop\nnop\nnop\nnop\nnop\nnop\nnop\nL: halt\njmp L").unwrap();
    assert_eq!(&forward[1..5], &le(7));
    assert_eq!(&forward[9..13], &le(7));
    assert_eq!(&backward[9..13], &le(7));
}

#[test]
fn duplicate_label() {
    match assemble("L: nop\nL: halt") {
        Err(Error::DuplicateLabel { name, pos, first }) => {
            assert_eq!(name, "L");
            assert_eq!((first.line, pos.line), (1, 2));
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn base_address_shifts_labels_not_length() {
    let src = "call f\nhalt\nf: ret";
    let image = Assembler::new().base(0x100).assemble(src).unwrap();
    assert_eq!(image.base, 0x100);
    assert_eq!(image.bytes.len(), 7);
    assert_eq!(&image.bytes[1..5], &le(0x106));
    assert_eq!(image.labels.get("f"), Some(0x106));

    let at_zero = assemble(src).unwrap();
    assert_eq!(&at_zero[1..5], &le(6));
}

#[test]
fn directives_fill_the_image() {
    let src = "
        irmovl $0, %eax
        .pos 0x10
    data:
        .long 0xdeadbeef
        .word 0x1234
        .byte 0x56
        .align 4
        .long data
    ";
    let bin = assemble(src).unwrap();
    let mut expect = vec![0x30, 0x80, 0, 0, 0, 0];
    expect.resize(0x10, 0);
    expect.extend([0xef, 0xbe, 0xad, 0xde, 0x34, 0x12, 0x56, 0x00]);
    expect.extend(le(0x10));
    assert_eq!(bin, expect);
}

#[test]
fn errors_surface_from_every_stage() {
    assert!(matches!(assemble("mov %eax"), Err(Error::UnknownMnemonic(..))));
    assert!(matches!(assemble("pushl %rax"), Err(Error::UnknownRegister(..))));
    assert!(matches!(assemble("addl %eax"), Err(Error::Syntax { .. })));
    assert!(matches!(assemble("halt\n.pos 0"), Err(Error::BackwardPosition { .. })));
    assert!(matches!(assemble(".long nowhere"), Err(Error::UndefinedLabel(..))));
}

#[test]
fn address_space_overflow() {
    let result = Assembler::new().base(u32::MAX).assemble("nop\nnop");
    assert!(matches!(result, Err(Error::AddressOverflow(_))));

    let result = Assembler::new().base(0xFFFF_FFFC).assemble("irmovl $1, %eax");
    assert!(matches!(result, Err(Error::AddressOverflow(_))));

    let result = Assembler::new().base(u32::MAX).assemble("halt\nend:");
    assert!(matches!(result, Err(Error::AddressOverflow(_))));
}

#[test]
fn image_may_end_at_last_address() {
    let image = Assembler::new().base(u32::MAX).assemble("halt").unwrap();
    assert_eq!(image.bytes, vec![0x10]);

    let image = Assembler::new()
        .base(0xFFFF_FFFA)
        .assemble("last: irmovl $1, %eax")
        .unwrap();
    assert_eq!(image.bytes.len(), 6);
    assert_eq!(image.labels.get("last"), Some(0xFFFF_FFFA));

    let image = Assembler::new().base(0xFFFF_FFFD).assemble("halt\n.align 4").unwrap();
    assert_eq!(image.bytes, vec![0x10, 0x00, 0x00]);
}

#[test]
fn empty_source() {
    case("", &[]);
    case("# nothing here\n", &[]);
}

#[test]
fn listing_follows_program_order() {
    use y86asm::resolve::Output;

    let image = Assembler::new().assemble("start: irmovl $3, %eax\nhalt").unwrap();
    let addrs: Vec<u32> = image.listing.iter().map(|line| line.addr).collect();
    assert_eq!(addrs, vec![0, 0, 6]);
    assert_eq!(image.listing[0].out, Output::Label("start".to_string()));
    assert!(matches!(image.listing[2].out, Output::Inst(arch::Inst::HALT())));
}
