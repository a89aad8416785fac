use divan::{Bencher, black_box};
use tagline::{MarkupOptions, Tag, html_with};

fn main() {
    divan::main();
}

fn table(t: &mut Tag<'_>, rows: usize) -> tagline::Result<()> {
    t.table().attr("class", "data").children(|t| {
        for row in 0..rows {
            t.tr().attr("data_row", row).children(|t| {
                t.td().text("name")?;
                t.td().text(format!("{row}"))?;
                t.td().children(|t| t.input().attr("checked", row % 2 == 0).build())
            })?;
        }
        Ok(())
    })
}

#[divan::bench(args = [10, 100, 1000])]
fn build_table(bencher: Bencher, rows: usize) {
    bencher.bench_local(|| {
        let html = html_with(MarkupOptions::new().document(), |t| table(t, black_box(rows)));
        black_box(html)
    });
}

#[divan::bench]
fn build_flat_paragraphs(bencher: Bencher) {
    bencher.bench_local(|| {
        let html = html_with(MarkupOptions::new(), |t| {
            for _ in 0..100 {
                t.p().attr("class", "lead").text("Lorem ipsum dolor sit amet")?;
            }
            Ok(())
        });
        black_box(html)
    });
}
