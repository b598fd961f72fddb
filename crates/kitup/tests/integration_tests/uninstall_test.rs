use crate::common::KitupTest;

#[test]
fn test_uninstall_reports_missing_tool() {
    let kitup = KitupTest::new();
    let output = kitup.kitup(&["uninstall", "aws"]);

    output.assert_success();
    assert_eq!(
        output.normalized_stdout(),
        "The AWS CLI is not installed in /storage/cli\n"
    );
}

#[cfg(unix)]
#[test]
fn test_uninstall_removes_only_the_named_tool() {
    let kitup = KitupTest::new();
    kitup.create_managed_tool("aws-cli/aws");
    kitup.create_managed_tool("sessionmanagerplugin/bin/session-manager-plugin");

    let output = kitup.kitup(&["uninstall", "aws"]);

    output.assert_success();
    assert!(
        output.stdout().contains("Removed the AWS CLI from"),
        "{}",
        output.stdout()
    );
    assert!(!kitup.install_dir().join("aws-cli").exists());
    assert!(
        kitup
            .install_dir()
            .join("sessionmanagerplugin/bin/session-manager-plugin")
            .exists()
    );
}

#[cfg(unix)]
#[test]
fn test_uninstall_is_idempotent() {
    let kitup = KitupTest::new();
    kitup.create_managed_tool("sessionmanagerplugin/bin/session-manager-plugin");

    kitup
        .kitup(&["uninstall", "session-manager-plugin"])
        .assert_success();
    let output = kitup.kitup(&["uninstall", "session-manager-plugin"]);

    output.assert_success();
    assert!(
        output.stdout().contains("is not installed"),
        "{}",
        output.stdout()
    );
}
