use rayon::ThreadPoolBuilder;
use std::collections::HashMap;
use termcolor::Buffer;
use tprint::{Palette, Printer};

const CALLS: usize = 40;
const ITEMS: usize = 5;

fn run<F>(printer: &Printer<Buffer>, work: F) -> usize
where
    F: Fn(&Printer<Buffer>, usize, usize) + Sync,
{
    let threads = num_cpus::get().clamp(4, 12);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .unwrap();
    pool.scope(|scope| {
        for worker in 0..threads {
            let work = &work;
            scope.spawn(move |_| {
                for call in 0..CALLS {
                    work(printer, worker, call);
                }
            });
        }
    });
    threads
}

fn split_tag(line: &str) -> (&str, &str, &str) {
    let rest = line.strip_prefix("\x1b[").unwrap();
    let (code, rest) = rest.split_once('m').unwrap();
    let end = rest.find(']').unwrap() + 1;
    (code, &rest[..end], &rest[end..])
}

// Colors in order of first appearance follow the palette, and each thread
// keeps its color.
fn check_colors(colors: &[(&str, &str)], threads: usize) {
    let mut assigned = HashMap::new();
    for (tag, code) in colors {
        let next = Palette::ANSI.codes[assigned.len() % Palette::ANSI.codes.len()];
        let code_for_tag = *assigned.entry(*tag).or_insert(next);
        assert_eq!(*code, code_for_tag, "{}", tag);
    }
    assert!(assigned.len() <= threads);
}

#[test]
fn test_lines_do_not_interleave() {
    let printer = Printer::new(Buffer::ansi());
    let threads = run(&printer, |printer, worker, call| {
        printer.print((0..ITEMS).map(|i| format!("w{}c{}i{}", worker, call, i)));
    });

    let output = String::from_utf8(printer.into_inner().into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), threads * CALLS);

    let mut colors = Vec::new();
    for line in lines {
        let (code, tag, rest) = split_tag(line);
        assert!(tag.starts_with("[ThreadId("), "{:?}", line);
        let body = rest
            .strip_prefix(' ')
            .and_then(|rest| rest.strip_suffix("\x1b[0m"))
            .unwrap();
        let words: Vec<&str> = body.split(' ').collect();
        assert_eq!(words.len(), ITEMS, "{:?}", line);
        let prefix = words[0].strip_suffix("i0").unwrap();
        for (i, word) in words.iter().enumerate() {
            assert_eq!(*word, format!("{}i{}", prefix, i));
        }
        colors.push((tag, code));
    }
    check_colors(&colors, threads);
}

#[test]
fn test_blocks_do_not_interleave() {
    let printer = Printer::new(Buffer::ansi());
    let threads = run(&printer, |printer, worker, call| {
        printer.print_range((0..ITEMS).map(|i| format!("w{}c{}i{}", worker, call, i)));
    });

    let output = String::from_utf8(printer.into_inner().into_inner()).unwrap();
    let mut lines = output.lines();
    let mut colors = Vec::new();
    let mut blocks = 0;
    while let Some(line) = lines.next() {
        let (code, tag, rest) = split_tag(line);
        assert!(tag.starts_with("[ThreadId("), "{:?}", line);
        assert_eq!(rest, "");

        let first = lines.next().unwrap();
        let prefix = first.strip_suffix("i0").unwrap();
        for i in 1..ITEMS {
            assert_eq!(lines.next().unwrap(), format!("{}i{}", prefix, i));
        }
        assert_eq!(lines.next(), Some("\x1b[0m"));

        colors.push((tag, code));
        blocks += 1;
    }
    assert_eq!(blocks, threads * CALLS);
    check_colors(&colors, threads);
}

#[test]
fn test_toggle_while_printing() {
    let printer = Printer::new(Buffer::ansi());
    let threads = run(&printer, |printer, worker, call| {
        if worker == 0 {
            printer.set_color_enabled(call % 2 == 0);
        } else {
            printer.print(["x"]);
        }
    });

    let output = String::from_utf8(printer.into_inner().into_inner()).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), (threads - 1) * CALLS);
    for line in lines {
        let body = if line.starts_with("\x1b[") {
            split_tag(line).2
        } else {
            &line[line.find(']').unwrap() + 1..]
        };
        assert_eq!(body, " x\x1b[0m");
    }
}
