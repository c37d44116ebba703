use std::io::Cursor;

use rust_decimal_macros::dec;

use fruit_cart::cli::{CliApp, SessionCommand, SessionFlow, SessionParseError};
use fruit_cart::services::CartStore;
use fruit_cart::utils::Config;

fn app() -> CliApp {
    CliApp::with_store(CartStore::default(), Config::default())
}

#[test]
fn test_parse_cart_commands() {
    assert_eq!("add 990".parse::<SessionCommand>(), Ok(SessionCommand::Add(990)));
    assert_eq!("inc 991".parse::<SessionCommand>(), Ok(SessionCommand::Increase(991)));
    assert_eq!("dec 992".parse::<SessionCommand>(), Ok(SessionCommand::Decrease(992)));
    assert_eq!("remove 990".parse::<SessionCommand>(), Ok(SessionCommand::Remove(990)));
    assert_eq!("pay 2.50".parse::<SessionCommand>(), Ok(SessionCommand::Pay(dec!(2.50))));
    assert_eq!("empty".parse::<SessionCommand>(), Ok(SessionCommand::Empty));
    assert_eq!("cart".parse::<SessionCommand>(), Ok(SessionCommand::Show));
    assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        "buy 990".parse::<SessionCommand>(),
        Err(SessionParseError::UnknownCommand { .. })
    ));
    assert!(matches!(
        "add".parse::<SessionCommand>(),
        Err(SessionParseError::MissingArgument { .. })
    ));
    assert!(matches!(
        "add -1".parse::<SessionCommand>(),
        Err(SessionParseError::InvalidProductId { .. })
    ));
    assert!(matches!(
        "pay lots".parse::<SessionCommand>(),
        Err(SessionParseError::InvalidAmount { .. })
    ));
    assert!(matches!(
        "pay -3".parse::<SessionCommand>(),
        Err(SessionParseError::NegativeAmount { .. })
    ));
    assert!(matches!(
        "total now".parse::<SessionCommand>(),
        Err(SessionParseError::TooManyArguments { .. })
    ));
    assert!(matches!(
        "add 990 991".parse::<SessionCommand>(),
        Err(SessionParseError::TooManyArguments { .. })
    ));
}

#[test]
fn test_run_script_drives_store() {
    let mut app = app();
    let script = "\
# two strawberries and an orange
add 990
add 990
inc 991

add 992
remove 992
pay 2
";

    let executed = app.run_script(Cursor::new(script)).unwrap();

    assert_eq!(executed, 6);
    assert_eq!(app.store().cart_total(), dec!(2.5));
    assert_eq!(app.store().pending_payment(), dec!(2));
    assert!(!app.store().contains(992));
}

#[test]
fn test_run_script_stops_at_quit() {
    let mut app = app();
    let script = "add 990\nquit\nadd 991\n";

    let executed = app.run_script(Cursor::new(script)).unwrap();

    assert_eq!(executed, 2);
    assert!(!app.store().contains(991));
}

#[test]
fn test_run_script_reports_bad_line() {
    let mut app = app();
    let script = "add 990\nfrobnicate\n";

    let error = app.run_script(Cursor::new(script)).unwrap_err();

    assert!(error.to_string().contains("Line 2"));
    assert!(app.store().contains(990));
}

#[test]
fn test_unknown_product_is_noop() {
    let mut app = app();

    let flow = app.execute(SessionCommand::Add(12345)).unwrap();

    assert_eq!(flow, SessionFlow::Continue);
    assert!(app.store().is_empty());
}

#[test]
fn test_empty_and_pay_commands() {
    let mut app = app();
    app.execute(SessionCommand::Add(991)).unwrap();
    app.execute(SessionCommand::Pay(dec!(1))).unwrap();

    app.execute(SessionCommand::Empty).unwrap();

    assert!(app.store().is_empty());
    assert_eq!(app.store().pending_payment(), dec!(0));

    app.execute(SessionCommand::Add(990)).unwrap();
    app.execute(SessionCommand::Pay(dec!(1))).unwrap();
    let receipt = app.store().last_receipt().unwrap();
    assert_eq!(receipt.change, dec!(0.75));
}

#[test]
fn test_export_command_leaves_store_untouched() {
    let mut app = app();
    app.execute(SessionCommand::Add(990)).unwrap();

    let flow = app.execute(SessionCommand::Export).unwrap();

    assert_eq!(flow, SessionFlow::Continue);
    assert_eq!(app.store().item_count(), 1);
    assert_eq!(app.store().cart_total(), dec!(0.25));
}

#[test]
fn test_receipt_command_before_and_after_payment() {
    let mut app = app();

    let flow = app.execute(SessionCommand::Receipt).unwrap();
    assert_eq!(flow, SessionFlow::Continue);
    assert!(app.store().last_receipt().is_none());

    app.execute(SessionCommand::Add(991)).unwrap();
    app.execute(SessionCommand::Pay(dec!(2))).unwrap();

    let flow = app.execute(SessionCommand::Receipt).unwrap();
    assert_eq!(flow, SessionFlow::Continue);
    assert_eq!(app.store().last_receipt().unwrap().total, dec!(2));
}
