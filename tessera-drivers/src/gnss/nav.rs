//! Navigation state accumulated across sentences.
//!
//! A receiver spreads one picture of the world over several sentence
//! types: position and date arrive in RMC, fix quality and altitude in
//! GGA, ground speed in VTG. [`NavState`] folds each decoded sentence into
//! a single current-best record.
//!
//! A present field always overwrites; an absent field leaves the previous
//! value in place. The validity indicators (`fix_status`, `quality`) gate
//! everything else through [`NavState::has_fix`], so a lost fix is never
//! masked by retained position data.

use tessera_nmea::{Coordinate, Date, FixQuality, FixStatus, Sentence, UtcTime};

/// Current-best navigation record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState {
    pub time: Option<UtcTime>,
    pub date: Option<Date>,
    pub latitude: Option<Coordinate>,
    pub longitude: Option<Coordinate>,
    pub speed_knots: Option<f32>,
    pub course_deg: Option<f32>,
    pub fix_status: Option<FixStatus>,
    pub quality: Option<FixQuality>,
    pub satellites_in_use: Option<u8>,
    pub hdop: Option<f32>,
    pub altitude_m: Option<f32>,
}

impl NavState {
    /// Whether the receiver currently reports a valid fix
    ///
    /// `false` until the first valid sentence arrives — "no fix yet" is
    /// not the same as a fix at zero.
    pub fn has_fix(&self) -> bool {
        match (self.fix_status, self.quality) {
            (Some(FixStatus::Void), _) => false,
            (_, Some(FixQuality::Invalid)) => false,
            (None, None) => false,
            _ => true,
        }
    }

    /// Fold one decoded sentence into the record
    pub fn apply(&mut self, sentence: &Sentence) {
        match sentence {
            Sentence::Rmc(rmc) => {
                self.fix_status = rmc.status.or(self.fix_status);
                update(&mut self.time, rmc.time);
                update(&mut self.date, rmc.date);
                update(&mut self.latitude, rmc.latitude);
                update(&mut self.longitude, rmc.longitude);
                update(&mut self.speed_knots, rmc.speed_knots);
                update(&mut self.course_deg, rmc.course_deg);
            }
            Sentence::Gga(gga) => {
                self.quality = gga.quality.or(self.quality);
                update(&mut self.time, gga.time);
                update(&mut self.latitude, gga.latitude);
                update(&mut self.longitude, gga.longitude);
                update(&mut self.satellites_in_use, gga.satellites_in_use);
                update(&mut self.hdop, gga.hdop);
                update(&mut self.altitude_m, gga.altitude_m);
            }
            Sentence::Gll(gll) => {
                self.fix_status = gll.status.or(self.fix_status);
                update(&mut self.time, gll.time);
                update(&mut self.latitude, gll.latitude);
                update(&mut self.longitude, gll.longitude);
            }
            Sentence::Vtg(vtg) => {
                update(&mut self.course_deg, vtg.course_true_deg);
                update(&mut self.speed_knots, vtg.speed_knots);
            }
            Sentence::Unknown(_) => {}
        }
    }
}

fn update<T: Copy>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_nmea::decode;

    fn apply_frame(nav: &mut NavState, frame: &[u8]) {
        nav.apply(&decode(frame).unwrap());
    }

    #[test]
    fn test_no_fix_until_first_valid_sentence() {
        let nav = NavState::default();
        assert!(!nav.has_fix());
        assert_eq!(nav.latitude, None);
    }

    #[test]
    fn test_fix_assembled_across_sentence_types() {
        let mut nav = NavState::default();
        apply_frame(
            &mut nav,
            b"GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        );
        apply_frame(
            &mut nav,
            b"GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        );

        assert!(nav.has_fix());
        assert_eq!(nav.satellites_in_use, Some(8));
        assert_eq!(nav.date.map(|d| d.full_year()), Some(1994));
        assert!((nav.altitude_m.unwrap() - 545.4).abs() < 1e-3);
        assert!((nav.speed_knots.unwrap() - 22.4).abs() < 1e-3);
    }

    #[test]
    fn test_lost_fix_keeps_position_but_reports_void() {
        let mut nav = NavState::default();
        apply_frame(
            &mut nav,
            b"GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        );
        // Receiver loses the fix: status V, value fields empty.
        apply_frame(&mut nav, b"GPRMC,,V,,,,,,,,,*31");

        assert!(!nav.has_fix());
        // Last known position is retained for display purposes.
        assert!(nav.latitude.is_some());
        assert_eq!(nav.fix_status, Some(FixStatus::Void));
    }

    #[test]
    fn test_unknown_sentences_do_not_touch_state() {
        let mut nav = NavState::default();
        apply_frame(&mut nav, b"GPZDA,201530.00,04,07,2002,00,00*60");
        assert_eq!(nav, NavState::default());
    }
}
