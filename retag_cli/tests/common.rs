use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

/// Where the built-in recipes look when nothing else is configured.
pub const DEFAULT_TARGET: &str = "frontend/src/pages/ConsultationFormPage.tsx";

pub const ACCORDION_PAGE: &str = "import {\n  Box,\n  Typography,\n  Button,\n  TextField,\n  \
                                  Accordion,\n  AccordionSummary,\n  AccordionDetails,\n  \
                                  Grid,\n} from '@mui/material';\n\n<Accordion defaultExpanded>\n  \
                                  <AccordionSummary expandIcon={<ExpandMore />}>\n    <Typography \
                                  variant=\"h6\">Details</Typography>\n  </AccordionSummary>\n  \
                                  <AccordionDetails sx={{ p: 2 }}>\n    <TextField \
                                  label=\"Notes\" />\n  </AccordionDetails>\n</Accordion>\n";

pub const SECTION_PAGE: &str = "import {\n  Box,\n  Typography,\n  Button,\n  TextField,\n  \
                                Grid,\n} from '@mui/material';\nimport { AppCard, AppButton, \
                                AppTextField, PageHeader, Section } from '../ui';\n\n<Section \
                                title=\"Details\" defaultExpanded>\n    <TextField label=\"Notes\" />\n  \
                                </Section>\n";

pub const APP_TEXT_FIELD_PAGE: &str = "import {\n  Box,\n  Typography,\n  Button,\n  Grid,\n} \
                                       from '@mui/material';\nimport { AppCard, AppButton, \
                                       AppTextField, PageHeader, Section } from '../ui';\n\n<Section \
                                       title=\"Details\" defaultExpanded>\n    <AppTextField label=\"Notes\" />\n  \
                                       </Section>\n";

pub fn retag_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("retag"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<PathBuf> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, content)?;
	Ok(path)
}
