use camino::Utf8PathBuf;
use camino_tempfile_ext::camino_tempfile::Utf8TempDir;
use std::io::Write;
use std::{
    collections::HashMap,
    process::{Command, Stdio},
};

pub struct KitupTest {
    pub temp_dir: Utf8TempDir,
    pub env: HashMap<String, String>,
}

impl KitupTest {
    pub fn new() -> Self {
        let temp_dir = Utf8TempDir::new().expect("Failed to create temporary directory");

        let mut test = Self {
            temp_dir,
            env: HashMap::new(),
        };

        test.env.insert(
            "KITUP_STORAGE_DIR".into(),
            test.storage_dir().into_string(),
        );
        // Probes only see executables the test plants.
        test.env.insert("PATH".into(), test.path_dir().into_string());
        // Consistent OS for cross-platform testing
        test.env.insert("KITUP_TEST_OS".into(), "linux".into());
        // Plain, unwrapped miette error output for stable assertions.
        test.env.insert("NO_GRAPHICS".into(), "1".into());

        std::fs::create_dir_all(test.path_dir()).expect("Failed to create PATH directory");

        test
    }

    pub fn storage_dir(&self) -> Utf8PathBuf {
        self.temp_dir.path().join("storage")
    }

    pub fn install_dir(&self) -> Utf8PathBuf {
        self.storage_dir().join("cli")
    }

    pub fn scratch_parent(&self) -> Utf8PathBuf {
        self.storage_dir().join("tmp")
    }

    pub fn path_dir(&self) -> Utf8PathBuf {
        self.temp_dir.path().join("bin")
    }

    pub fn kitup(&self, args: &[&str]) -> KitupOutput {
        let mut cmd = self.kitup_command();
        cmd.args(args);

        let output = cmd.output().expect("Failed to execute kitup command");
        KitupOutput::new(self.temp_dir.path().as_str(), output)
    }

    pub fn kitup_with_stdin(&self, args: &[&str], input: &str) -> KitupOutput {
        let mut cmd = self.kitup_command();
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().expect("Failed to spawn kitup command");
        child
            .stdin
            .as_mut()
            .expect("child stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write to kitup stdin");
        let output = child
            .wait_with_output()
            .expect("Failed to wait for kitup command");
        KitupOutput::new(self.temp_dir.path().as_str(), output)
    }

    pub fn kitup_command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_kitup"));
        cmd.current_dir(self.temp_dir.path());
        cmd.env_clear().envs(&self.env);
        cmd
    }

    /// Plant a fake executable on the probe search path.
    #[cfg(unix)]
    pub fn create_global_tool(&self, name: &str) {
        write_fake_executable(&self.path_dir().join(name));
    }

    /// Plant a fake executable inside the managed install directory.
    #[cfg(unix)]
    pub fn create_managed_tool(&self, relative_path: &str) {
        write_fake_executable(&self.install_dir().join(relative_path));
    }
}

#[cfg(unix)]
fn write_fake_executable(path: &camino::Utf8Path) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create tool directory");
    std::fs::write(path, "#!/bin/sh\nexit 0\n").expect("Failed to create fake executable");

    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

/// A linux AWS CLI bundle zip whose `aws/install` script actually creates
/// the binary it was pointed at, like the real bundle does.
#[cfg(unix)]
pub fn aws_bundle_zip() -> Vec<u8> {
    let script = concat!(
        "#!/bin/sh\n",
        "set -e\n",
        "install_dir=\"\"\n",
        "while [ $# -gt 0 ]; do\n",
        "  case \"$1\" in\n",
        "    -i) install_dir=\"$2\"; shift 2 ;;\n",
        "    -b) shift 2 ;;\n",
        "    *) shift ;;\n",
        "  esac\n",
        "done\n",
        "mkdir -p \"$install_dir\"\n",
        "printf '#!/bin/sh\\nexit 0\\n' > \"$install_dir/aws\"\n",
        "chmod 755 \"$install_dir/aws\"\n",
    );

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(&mut cursor);
    let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
    zip.start_file("aws/install", options).unwrap();
    zip.write_all(script.as_bytes()).unwrap();
    zip.finish().unwrap();
    cursor.into_inner()
}

pub struct KitupOutput {
    pub output: std::process::Output,
    pub test_root: String,
}

impl KitupOutput {
    pub fn new(test_root: &str, output: std::process::Output) -> Self {
        Self {
            output,
            test_root: test_root.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    #[track_caller]
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success(),
            "Expected command to succeed, got {:#?}",
            self.output
        );
        self
    }

    #[track_caller]
    pub fn assert_failure(&self) -> &Self {
        assert!(
            !self.success(),
            "Expected command to fail, got {:#?}",
            self.output
        );
        self
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Output with the temp-dir prefix stripped, for stable assertions.
    pub fn normalized_stdout(&self) -> String {
        self.stdout().replace(&self.test_root, "")
    }

    pub fn normalized_stderr(&self) -> String {
        self.stderr().replace(&self.test_root, "")
    }
}
