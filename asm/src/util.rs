use crate::assembler::Image;
use crate::resolve::Output;
use color_print::cformat;

const SHOWN: usize = 6;

fn hex(bytes: impl Iterator<Item = u8>, len: usize) -> String {
    let mut s = bytes
        .take(SHOWN)
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");
    if len > SHOWN {
        s.push_str(" ..");
    }
    s
}

/// Leading bytes of one listing entry. Fills are never materialized.
fn preview(out: &Output) -> String {
    match out {
        Output::Fill(len) => hex(std::iter::repeat(0).take(*len as usize), *len as usize),
        Output::Data(data) => hex(data.iter().copied(), data.len()),
        _ => {
            let bytes = out.bytes();
            hex(bytes.iter().copied(), bytes.len())
        }
    }
}

pub fn print_dump(image: &Image) {
    println!("------------+----------------------+--------------------------------");
    for line in &image.listing {
        let body = match &line.out {
            Output::Label(name) => cformat!("<g>{}:</>", name),
            Output::Inst(inst) => format!("    {}", inst.cformat()),
            Output::Data(data) => cformat!("    <c>.data {}</>", hex(data.iter().copied(), data.len())),
            Output::Fill(len) => cformat!("    <c>.fill {}</>", len),
        };
        match line.out {
            Output::Label(_) => println!("{:12}| {:20} | {}", "", "", body),
            _ => println!("[0x{:08X}] | {:<20} | {}", line.addr, preview(&line.out), body),
        }
    }
    println!("------------+----------------------+--------------------------------");
}
