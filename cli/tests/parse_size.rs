use fallthumb_cli::parse_size;
use fallthumb_types::SizeSpec;
use pretty_assertions::assert_eq;

#[test]
fn pairs_become_explicit_sizes() {
    assert_eq!(parse_size("64x48"), SizeSpec::explicit(64, 48));
    assert_eq!(parse_size("64X48"), SizeSpec::explicit(64, 48));
    assert_eq!(parse_size(" 64 x 48 "), SizeSpec::explicit(64, 48));
}

#[test]
fn everything_else_is_a_name() {
    assert_eq!(parse_size("thumbnail"), SizeSpec::named("thumbnail"));
    assert_eq!(parse_size("box-large"), SizeSpec::named("box-large"));
    assert_eq!(parse_size("64x"), SizeSpec::named("64x"));
}
