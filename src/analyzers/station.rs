use crate::analyzers::types::StationStats;
use crate::analyzers::utility::mode;
use crate::error::{BikeshareError, Result};
use crate::trips::TripSet;

/// Most common start station, end station and start-to-end route.
pub fn station_stats(trips: &TripSet) -> Result<StationStats> {
    let records = trips.records();
    let empty = || BikeshareError::EmptyInput {
        statistic: "most popular stations",
    };

    let common_start_station =
        mode(records.iter().map(|r| r.start_station.as_str())).ok_or_else(empty)?;
    let common_end_station =
        mode(records.iter().map(|r| r.end_station.as_str())).ok_or_else(empty)?;
    let common_route = mode(records.iter().map(|r| r.route())).ok_or_else(empty)?;

    Ok(StationStats {
        common_start_station: common_start_station.to_string(),
        common_end_station: common_end_station.to_string(),
        common_route,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trips(csv_rows: &str) -> TripSet {
        let csv = format!("Start Time,Trip Duration,Start Station,End Station,User Type\n{csv_rows}");
        TripSet::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_station_stats() {
        let set = trips(
            "2017-01-02 08:00:00,60,Canal St,Clark St,Subscriber\n\
             2017-01-02 09:00:00,60,Canal St,State St,Subscriber\n\
             2017-01-02 10:00:00,60,State St,Clark St,Subscriber\n\
             2017-01-02 11:00:00,60,State St,Clark St,Customer\n",
        );
        let stats = station_stats(&set).unwrap();
        // Canal St and State St tie as start stations.
        assert_eq!(stats.common_start_station, "Canal St");
        assert_eq!(stats.common_end_station, "Clark St");
        assert_eq!(stats.common_route, "State St to Clark St");
    }

    #[test]
    fn test_station_stats_empty() {
        assert!(station_stats(&TripSet::default()).is_err());
    }
}
