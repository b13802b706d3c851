//! Sample form page used across the tests, and what each built-in recipe
//! turns it into.

/// A trimmed consultation form page with two accordion sections.
pub(crate) const CONSULTATION_PAGE: &str = r#"import { useState } from 'react';
import {
  Box,
  Paper,
  Typography,
  Button,
  TextField,
  Accordion,
  AccordionSummary,
  AccordionDetails,
  Grid,
  Alert,
} from '@mui/material';
import { ExpandMore, Save } from '@mui/icons-material';
import { AppCard, AppButton, AppTextField, PageHeader } from '../ui';

export default function ConsultationFormPage() {
  return (
    <Box>
      <PageHeader title="Konsultacja" />
      <TextField label="Data" />

      {/* Hair Loss Section */}
      <Accordion defaultExpanded>
        <AccordionSummary expandIcon={<ExpandMore />}>
          <Typography variant="h6">1. Wypadanie włosów</Typography>
        </AccordionSummary>
        <AccordionDetails sx={{ p: { xs: 2, sm: 3 } }}>
          <Grid container spacing={2}>
            <TextField fullWidth label="Używane szampony" multiline rows={2} />
          </Grid>
        </AccordionDetails>
      </Accordion>

      {/* Oily Hair Section */}
      <Accordion>
        <AccordionSummary expandIcon={<ExpandMore />}>
          <Typography variant="h6">2. Przetłuszczanie</Typography>
        </AccordionSummary>
        <AccordionDetails sx={{ p: { xs: 2, sm: 3 } }}>
          <TextField fullWidth label="Częstotliwość mycia" />
        </AccordionDetails>
      </Accordion>

      <AppButton startIcon={<Save />}>Zapisz</AppButton>
    </Box>
  );
}
"#;

/// [`CONSULTATION_PAGE`] after `accordion-to-section`.
pub(crate) const CONSULTATION_PAGE_WITH_SECTIONS: &str = r#"import { useState } from 'react';
import {
  Box,
  Paper,
  Typography,
  Button,
  TextField,
  Grid,
  Alert,
} from '@mui/material';
import { ExpandMore, Save } from '@mui/icons-material';
import { AppCard, AppButton, AppTextField, PageHeader, Section } from '../ui';

export default function ConsultationFormPage() {
  return (
    <Box>
      <PageHeader title="Konsultacja" />
      <TextField label="Data" />

      {/* Hair Loss Section */}
      <Section title="1. Wypadanie włosów" defaultExpanded>
          <Grid container spacing={2}>
            <TextField fullWidth label="Używane szampony" multiline rows={2} />
          </Grid>
        </Section>

      {/* Oily Hair Section */}
      <Section title="2. Przetłuszczanie">
          <TextField fullWidth label="Częstotliwość mycia" />
        </Section>

      <AppButton startIcon={<Save />}>Zapisz</AppButton>
    </Box>
  );
}
"#;

/// [`CONSULTATION_PAGE_WITH_SECTIONS`] after `app-text-field`.
pub(crate) const CONSULTATION_PAGE_WITH_APP_TEXT_FIELDS: &str = r#"import { useState } from 'react';
import {
  Box,
  Paper,
  Typography,
  Button,
  Grid,
  Alert,
} from '@mui/material';
import { ExpandMore, Save } from '@mui/icons-material';
import { AppCard, AppButton, AppTextField, PageHeader, Section } from '../ui';

export default function ConsultationFormPage() {
  return (
    <Box>
      <PageHeader title="Konsultacja" />
      <AppTextField label="Data" />

      {/* Hair Loss Section */}
      <Section title="1. Wypadanie włosów" defaultExpanded>
          <Grid container spacing={2}>
            <AppTextField fullWidth label="Używane szampony" multiline rows={2} />
          </Grid>
        </Section>

      {/* Oily Hair Section */}
      <Section title="2. Przetłuszczanie">
          <AppTextField fullWidth label="Częstotliwość mycia" />
        </Section>

      <AppButton startIcon={<Save />}>Zapisz</AppButton>
    </Box>
  );
}
"#;
