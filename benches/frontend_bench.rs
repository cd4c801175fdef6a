use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treewalk::{AstPrinter, Diagnostics, Parser, Scanner};

const SOURCE: &str = r#"
    // arithmetic with nested groups
    /* and a /* nested */ comment */
    (1 + 2.5) * -3 / (4 - 5) >= 6 == !(7 < 8) != "done"
"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize expression", |b| {
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            Scanner::new(black_box(SOURCE), &mut diagnostics).scan_tokens()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(SOURCE, &mut diagnostics).scan_tokens();

    c.bench_function("parse and print expression", |b| {
        b.iter(|| {
            let mut diagnostics = Diagnostics::new();
            let expression = Parser::new(black_box(tokens.clone()), &mut diagnostics).parse();
            expression.map(|e| AstPrinter.print(&e))
        })
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark);
criterion_main!(benches);
