// Snapshot tests: lock generated output to detect unintended changes in
// the encoding strategy.
//
// Uses the library API directly. Inline snapshots are reviewed with
// `cargo insta review` after intentional output changes.

use bfg::format;
use bfg::pipeline::{BuildOptions, Builder};
use bfg::registry::Registry;

fn generate(profile: &str, text: &str) -> String {
    let registry = Registry::with_builtins();
    Builder::new(&registry, BuildOptions::new(profile))
        .build(text.as_bytes())
        .expect("build failed")
        .code
}

#[test]
fn hi_on_32c() {
    insta::assert_snapshot!(
        generate("32C", "Hi"),
        @"++++[>++++[>++[>+>++>+++>++++<<<<-]<-]<-]>>>>++++++++.><<<++++[>>>++<<<-]>>>+.<<<<<"
    );
}

#[test]
fn single_letter_on_32z() {
    insta::assert_snapshot!(
        generate("32Z", "A"),
        @"++++[>++++[>++[>+>>++>>+++>>++++<<<<<<<-]<-]<-]>>>>>+.<<<<<"
    );
}

#[test]
fn space_on_16c_is_an_exact_seed() {
    insta::assert_snapshot!(
        generate("16C", " "),
        @"++++[>++++[>++[>>+>>++>>+++>>++++<<<<<<<<-]+[>+>>+++>>+++++>>+++++++<<<<<<<-]<-]<-]>>>>.<<<<"
    );
}

#[test]
fn wrapped_presentation() {
    let wrapped = format::format(&generate("32Z", "A"), 20, format::DEFAULT_FILLER);
    insta::assert_snapshot!(wrapped, @r"
    ++++[>++++[>++[>+>>+
    +>>+++>>++++<<<<<<<-
    ]<-]<-]>>>>>+.<<<<<#
    ");
}
